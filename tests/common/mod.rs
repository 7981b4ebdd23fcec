//! Common test utilities and helpers

/// Sheet payload fixtures in the upstream JSON shape.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A small quarterly sheet: one period-header row, one revenue row, one
    /// secondary metric row.
    pub fn quarterly_sheet() -> Value {
        json!([
            {"": "Quarter", "Release": "Quarter", "31 Dec 23": "Q4", "30 Sep 23": "Q3"},
            {"": "1,234", "Release": "Revenue", "31 Dec 23": "1,234", "30 Sep 23": "1,000"},
            {"": "", "Release": "Net Income", "31 Dec 23": "200", "30 Sep 23": "(50)"}
        ])
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("revenue_dash=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }
}
