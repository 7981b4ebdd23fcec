//! Dashboard assembly: per-ticker fetch, normalization, and caching.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use futures::future::join_all;
use tracing::{info, warn};

use crate::api::{RowsProvider, SheetsClient};
use crate::models::{
    CardData, Company, Config, DashboardData, HistoricalSeries, Row, COMPANIES,
};
use crate::normalize::{
    extract_historical, find_revenue_row, is_period_column, period_sort_key, summarize_card,
};

/// Process-wide cache of assembled dashboards, keyed by ticker (with its
/// upstream "$" prefix). Populated lazily, never evicted in production.
/// Concurrent misses for one ticker may both fetch; the later insert wins.
#[derive(Default)]
pub struct DashboardCache {
    entries: Mutex<HashMap<String, Arc<DashboardData>>>,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticker: &str) -> Option<Arc<DashboardData>> {
        self.entries.lock().unwrap().get(ticker).cloned()
    }

    pub fn insert(&self, ticker: &str, data: Arc<DashboardData>) {
        self.entries.lock().unwrap().insert(ticker.to_string(), data);
    }

    /// Drop every cached dashboard. Unused on the production path; exists so
    /// tests can force refetches.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assembles and caches per-company dashboard data. Constructed once per
/// process; the cache lives as long as the service.
pub struct DashboardService {
    provider: Arc<dyn RowsProvider>,
    cache: DashboardCache,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn RowsProvider>) -> Self {
        Self {
            provider,
            cache: DashboardCache::new(),
        }
    }

    /// Wire up the real sheets client from environment configuration.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let client = SheetsClient::new(&config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn cache(&self) -> &DashboardCache {
        &self.cache
    }

    /// Assemble (or return the cached) dashboard data for one ticker.
    ///
    /// Fetch failures, empty payloads, and heuristic misses all degrade to
    /// "N/A" placeholders instead of erroring; callers never branch on a
    /// failed future, only on placeholder values.
    pub async fn company_dashboard(&self, ticker: &str) -> Arc<DashboardData> {
        if let Some(cached) = self.cache.get(ticker) {
            return cached;
        }

        let rows = match self.provider.fetch_rows(ticker).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Fetch failed for {}: {}", ticker, e);
                Vec::new()
            }
        };

        let data = Arc::new(assemble(rows));
        self.cache.insert(ticker, Arc::clone(&data));
        data
    }

}

/// Load dashboards for every tracked company concurrently. Per-company
/// failures are already absorbed into placeholders; only a task join
/// failure aborts the load.
pub async fn load_all_dashboards(
    service: Arc<DashboardService>,
) -> Result<Vec<(Company, Arc<DashboardData>)>> {
    info!("🚀 Loading dashboards for {} companies", COMPANIES.len());

    let mut handles = Vec::with_capacity(COMPANIES.len());
    for company in COMPANIES {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let data = service.company_dashboard(company.ticker).await;
            (company, data)
        }));
    }

    let mut dashboards = Vec::with_capacity(handles.len());
    for joined in join_all(handles).await {
        dashboards.push(joined?);
    }

    info!("✅ Loaded {} dashboards", dashboards.len());
    Ok(dashboards)
}

/// Derive one company's dashboard data from its raw sheet rows.
fn assemble(rows: Vec<Row>) -> DashboardData {
    if rows.is_empty() {
        return DashboardData::placeholder();
    }

    // Period columns come from the first row's headers, latest first.
    let mut periods: Vec<String> = rows[0]
        .headers()
        .filter(|h| is_period_column(h))
        .map(str::to_string)
        .collect();
    periods.sort_by_key(|h| std::cmp::Reverse(period_sort_key(h)));

    let (card_data, historical_data) = match find_revenue_row(&rows) {
        Some(revenue_row) if !periods.is_empty() => (
            summarize_card(revenue_row, &periods),
            extract_historical(&rows, &periods),
        ),
        _ => (CardData::placeholder(), HistoricalSeries::new()),
    };

    let all_rows: Vec<Row> = rows.into_iter().filter(Row::has_content).collect();

    DashboardData {
        card_data,
        historical_data,
        all_rows,
    }
}
