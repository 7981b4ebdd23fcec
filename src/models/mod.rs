use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use url::Url;

/// Column header under which the sheets put a row's label or headline value.
pub const ROW_LABEL_COLUMN: &str = "";

/// Column header naming the release/metric a row belongs to.
pub const RELEASE_COLUMN: &str = "Release";

/// Placeholder shown wherever a value could not be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single spreadsheet cell. The upstream sheets are loosely typed: a cell
/// is free text, a number, or missing entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Display text of a cell: the string itself, a number rendered plainly,
    /// or "" when missing.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Empty => String::new(),
        }
    }

    /// True for missing cells and empty strings.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

/// One spreadsheet row: column header to cell value. No schema is guaranteed
/// across sheets; all access goes through the normalization heuristics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub BTreeMap<String, CellValue>);

impl Row {
    /// Cell under the given header; absent headers read as an empty cell.
    pub fn get(&self, header: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.0.get(header).unwrap_or(&EMPTY)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Cell in the row-label column.
    pub fn label_cell(&self) -> &CellValue {
        self.get(ROW_LABEL_COLUMN)
    }

    /// Cell in the "Release" column.
    pub fn release_cell(&self) -> &CellValue {
        self.get(RELEASE_COLUMN)
    }

    /// True if at least one cell is neither missing nor an empty string.
    pub fn has_content(&self) -> bool {
        self.0.values().any(|cell| !cell.is_blank())
    }
}

/// Compact summary shown on a company's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardData {
    pub revenue: String,
    pub change: String,
    pub percentage_change: String,
    /// `None` exactly when `percentage_change` is "N/A"; may hold
    /// `f64::INFINITY` / `f64::NEG_INFINITY` for zero-base periods.
    pub numeric_percentage_change: Option<f64>,
    pub revenue_label: String,
}

impl CardData {
    /// Card shown when data is missing or the heuristics find nothing.
    pub fn placeholder() -> Self {
        Self {
            revenue: NOT_AVAILABLE.to_string(),
            change: NOT_AVAILABLE.to_string(),
            percentage_change: NOT_AVAILABLE.to_string(),
            numeric_percentage_change: None,
            revenue_label: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One point of a metric's historical series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub period: String,
    pub value: f64,
}

/// Per-metric series ordered oldest to newest.
pub type HistoricalSeries = HashMap<String, Vec<HistoricalPoint>>;

/// Everything the dashboard derives for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub card_data: CardData,
    pub historical_data: HistoricalSeries,
    pub all_rows: Vec<Row>,
}

impl DashboardData {
    /// Degraded result used when the upstream fetch fails or returns nothing.
    pub fn placeholder() -> Self {
        Self {
            card_data: CardData::placeholder(),
            historical_data: HistoricalSeries::new(),
            all_rows: Vec::new(),
        }
    }
}

/// One tracked company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub ticker: &'static str,
    pub name: &'static str,
}

/// The fixed set of companies the dashboard tracks. Tickers carry the "$"
/// prefix the upstream sheet tabs use.
pub const COMPANIES: [Company; 7] = [
    Company { ticker: "$AAPL", name: "Apple" },
    Company { ticker: "$MSFT", name: "Microsoft" },
    Company { ticker: "$GOOGL", name: "Alphabet" },
    Company { ticker: "$AMZN", name: "Amazon" },
    Company { ticker: "$NVDA", name: "NVIDIA" },
    Company { ticker: "$META", name: "Meta" },
    Company { ticker: "$TSLA", name: "Tesla" },
];

/// Configuration for the upstream sheets client.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let base_url = std::env::var("SHEETS_BASE_URL")
            .map_err(|_| anyhow::anyhow!("SHEETS_BASE_URL environment variable required"))?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("invalid SHEETS_BASE_URL: {}", e))?;

        let request_timeout_secs = std::env::var("SHEETS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Config {
            base_url,
            request_timeout_secs,
        })
    }
}
