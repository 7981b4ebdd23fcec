use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{FetchError, RowsProvider};
use crate::models::{Config, Row};

/// HTTP client for the sheet-backed financial data source.
pub struct SheetsClient {
    client: Client,
    base_url: Url,
}

impl SheetsClient {
    /// Create a new sheets client
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent("revenue-dash/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// URL of the sheet tab holding one ticker's rows.
    fn tab_url(&self, ticker: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            ticker
        )
    }
}

#[async_trait]
impl RowsProvider for SheetsClient {
    async fn fetch_rows(&self, ticker: &str) -> Result<Vec<Row>, FetchError> {
        let url = self.tab_url(ticker);
        debug!("Fetching sheet rows from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("Sheet fetch for {} failed with status {}", ticker, response.status());
            return Err(FetchError::Status(response.status()));
        }

        let payload: Value = response.json().await?;
        let rows: Vec<Row> = serde_json::from_value(payload)?;

        debug!("Fetched {} rows for {}", rows.len(), ticker);
        Ok(rows)
    }
}
