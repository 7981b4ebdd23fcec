//! Normalization heuristics that turn loosely-typed sheet rows into
//! dashboard data: numeric cell parsing, period column recognition and
//! ordering, revenue row selection, card summarization, and historical
//! series extraction.

pub mod card;
pub mod history;
pub mod numeric;
pub mod period;
pub mod revenue;

pub use card::summarize_card;
pub use history::extract_historical;
pub use numeric::parse_numeric;
pub use period::{is_period_column, parse_period, period_sort_key};
pub use revenue::find_revenue_row;
