use super::parse_numeric;
use crate::models::{HistoricalPoint, HistoricalSeries, Row};

/// Row labels that denote period-header rows rather than metrics.
const SKIPPED_METRICS: [&str; 2] = ["Quarter", "Episode"];

/// Build one oldest-to-newest series per metric across all period columns.
///
/// Cells that fail to parse contribute nothing; rows with no parseable cell
/// are dropped; duplicate metric names keep the last row seen.
pub fn extract_historical(rows: &[Row], ordered_periods: &[String]) -> HistoricalSeries {
    let mut series = HistoricalSeries::new();

    for row in rows {
        let metric = metric_name(row);
        if metric.is_empty() || SKIPPED_METRICS.contains(&metric.as_str()) {
            continue;
        }

        let points: Vec<HistoricalPoint> = ordered_periods
            .iter()
            .rev()
            .filter_map(|period| {
                parse_numeric(row.get(period)).map(|value| HistoricalPoint {
                    period: period.clone(),
                    value,
                })
            })
            .collect();

        if !points.is_empty() {
            series.insert(metric, points);
        }
    }

    series
}

/// Trimmed row-label text, falling back to the "Release" column.
fn metric_name(row: &Row) -> String {
    let label = row.label_cell().display();
    let label = label.trim();
    if !label.is_empty() {
        return label.to_string();
    }
    row.release_cell().display().trim().to_string()
}
