use crate::models::CellValue;

/// Parse a heterogeneous sheet cell into a number.
///
/// Accepts native numbers, strings with thousands-separator commas, a
/// trailing `%` (yielding the fractional value), and accountant-style
/// parenthesized negatives. Anything else is `None`.
pub fn parse_numeric(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_text(s),
        CellValue::Empty => None,
    }
}

fn parse_text(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");

    // Percent handling takes priority; "(5)%" is not a negative percent.
    if let Some(body) = cleaned.strip_suffix('%') {
        return parse_float_prefix(body).map(|v| v / 100.0);
    }

    if cleaned.len() >= 2 && cleaned.starts_with('(') && cleaned.ends_with(')') {
        let inner = &cleaned[1..cleaned.len() - 1];
        return parse_float_prefix(&format!("-{}", inner));
    }

    parse_float_prefix(&cleaned)
}

/// Longest-valid-prefix float parse: leading whitespace is skipped and
/// trailing non-numeric characters are ignored, so "42 units" parses as 42.
/// A string with no valid numeric prefix yields `None`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
