use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::Row;

pub mod sheets;
pub use sheets::SheetsClient;

/// Errors surfaced by an upstream rows fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Upstream tabular data source: one JSON array of rows per ticker tab.
#[async_trait]
pub trait RowsProvider: Send + Sync {
    async fn fetch_rows(&self, ticker: &str) -> Result<Vec<Row>, FetchError>;
}
