use chrono::Datelike;

use super::{parse_numeric, parse_period};
use crate::models::{CardData, Row};

/// Outcome of labeling the latest reporting period.
enum PeriodLabel {
    Quarter { quarter: u32, year: i32 },
    Fallback,
}

/// Summarize the revenue row over periods sorted latest-first into the data
/// shown on a company card. Callers guarantee at least one period column.
pub fn summarize_card(revenue_row: &Row, ordered_periods: &[String]) -> CardData {
    let latest = ordered_periods[0].as_str();
    let previous = ordered_periods.get(1).map(String::as_str);

    let latest_value = parse_numeric(revenue_row.get(latest));
    let previous_value = previous.and_then(|p| parse_numeric(revenue_row.get(p)));

    let mut card = CardData::placeholder();

    if let Some(value) = latest_value {
        card.revenue = format_grouped(value);
    }

    if let (Some(latest_value), Some(previous_value)) = (latest_value, previous_value) {
        let delta = latest_value - previous_value;
        card.change = format_grouped(delta);

        if previous_value != 0.0 {
            let ratio = delta / previous_value;
            card.percentage_change = format_percent(ratio);
            card.numeric_percentage_change = Some(ratio);
        } else if delta > 0.0 {
            card.percentage_change = "Inf%".to_string();
            card.numeric_percentage_change = Some(f64::INFINITY);
        } else {
            // Matches the upstream sheets' dashboard: a 0 -> 0 period also
            // reads as "-Inf%".
            card.percentage_change = "-Inf%".to_string();
            card.numeric_percentage_change = Some(f64::NEG_INFINITY);
        }
    }

    card.revenue_label = match label_period(latest) {
        PeriodLabel::Quarter { quarter, year } => format!("Q{} {}", quarter, year),
        PeriodLabel::Fallback => format!("Latest ({})", latest),
    };

    card
}

fn label_period(header: &str) -> PeriodLabel {
    match parse_period(header) {
        Some(date) if date.year() > 1900 => PeriodLabel::Quarter {
            quarter: date.month0() / 3 + 1,
            year: date.year(),
        },
        _ => PeriodLabel::Fallback,
    }
}

/// Format a number the way the dashboard's fixed locale renders it: "." as
/// thousands separator, "," as decimal separator, at most three fractional
/// digits with trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_digits, frac_digits) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::new();
    if value.is_sign_negative()
        && (int_digits.chars().any(|c| c != '0') || !frac_digits.is_empty())
    {
        out.push('-');
    }
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (int_digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    if !frac_digits.is_empty() {
        out.push(',');
        out.push_str(frac_digits);
    }
    out
}

/// Render a ratio as a percentage with exactly two decimals and a ","
/// decimal separator.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0).replace('.', ",")
}
