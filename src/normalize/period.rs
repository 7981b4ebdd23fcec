use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Headers like "31 Dec 23" or "5 Jan 2024", matched anywhere in the string.
static DAY_MON_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}) ([A-Za-z]{3}) (\d{2,4})").unwrap());

/// Exact ISO calendar dates, "2024-01-05".
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Whether a column header denotes a reporting period.
pub fn is_period_column(header: &str) -> bool {
    DAY_MON_YEAR.is_match(header) || ISO_DATE.is_match(header)
}

/// Parse a period header into a calendar date. `None` means the header does
/// not look like a date, or names an impossible one.
///
/// Month abbreviations match the English three-letter forms exactly
/// (case-sensitive); two-digit years are 2000-based.
pub fn parse_period(header: &str) -> Option<NaiveDate> {
    if ISO_DATE.is_match(header) {
        return NaiveDate::parse_from_str(header, "%Y-%m-%d").ok();
    }

    let caps = DAY_MON_YEAR.captures(header)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = MONTH_ABBREVIATIONS.iter().position(|m| *m == &caps[2])? as u32 + 1;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Chronological sort key for a period header. Unparseable headers collapse
/// to the epoch so they sort last when ordering descending. Only for
/// comparison, never for display.
pub fn period_sort_key(header: &str) -> NaiveDate {
    parse_period(header).unwrap_or_else(epoch)
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date")
}
