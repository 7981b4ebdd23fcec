use super::{is_period_column, parse_numeric};
use crate::models::{CellValue, Row};

/// `Release` values marking a header/metadata row rather than a data row.
const METADATA_RELEASE_LABELS: [&str; 4] = ["Quarter", "Episode", "Period", "Metric"];

/// Row-label values at or below this are assumed to be ordinals or codes,
/// not revenue figures.
const MIN_REVENUE_VALUE: f64 = 100.0;

/// Heuristically pick the row carrying top-line revenue.
///
/// Sheets have inconsistent layouts; the largest row-label value above the
/// floor, among rows that have at least one dated column, reliably lands on
/// the top-line figure. Rows that merely label periods (a metadata word in
/// the `Release` column) are never selected, however large they look. Ties
/// keep the first row seen.
pub fn find_revenue_row(rows: &[Row]) -> Option<&Row> {
    let mut best: Option<(&Row, f64)> = None;

    for row in rows {
        let value = match parse_numeric(row.label_cell()) {
            Some(v) => v,
            None => continue,
        };
        if value <= MIN_REVENUE_VALUE {
            continue;
        }
        if !row.headers().any(is_period_column) {
            continue;
        }
        if is_metadata_row(row) {
            continue;
        }

        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((row, value)),
        }
    }

    best.map(|(row, _)| row)
}

fn is_metadata_row(row: &Row) -> bool {
    match row.release_cell() {
        CellValue::Text(s) => METADATA_RELEASE_LABELS.contains(&s.trim()),
        _ => false,
    }
}
