//! # Formatter
//!
//! Number, currency and duration rendering in a single fixed locale (es-AR):
//! `.` groups thousands, `,` separates decimals, currency is prefixed with `$`.
//!
//! ```text
//! 67500.0   → "67.500,00"
//! 67500.0   → "$ 67.500,00"   (format_currency)
//! 18000 s   → "5 h 00 min"    (format_duration)
//! ```

use chrono::{DateTime, NaiveDate};

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_SYMBOL: &str = "$";

/// Format a number with a fixed number of decimals and grouped thousands.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    // "-0,00" reads badly, only show the sign when something non-zero survives rounding
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Two decimals, currency symbol first: `"$ 1.566,00"`.
pub fn format_currency(value: f64) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_number(value, 2))
}

pub fn format_liters(liters: f64) -> String {
    format!("{} L", format_number(liters, 2))
}

pub fn format_distance(km: f64) -> String {
    format!("{} km", format_number(km, 1))
}

/// Render seconds as hours and minutes. Under an hour only minutes are shown.
pub fn format_duration(seconds: u64) -> String {
    let total_minutes = (seconds + 30) / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{minutes} min")
    } else {
        format!("{} h {:02} min", group_thousands(&hours.to_string()), minutes)
    }
}

/// Render a user-entered hour count to at most two decimals.
/// Values that round to a whole number drop the decimals.
pub fn format_hours(hours: f64) -> String {
    let rendered = format_number(hours, 2);
    let trimmed = rendered
        .trim_end_matches('0')
        .trim_end_matches(DECIMAL_SEPARATOR);
    format!("{} h", trimmed)
}

/// Render a `YYYY-MM-DD` (or RFC 3339) date as `dd/mm/yyyy`.
///
/// Anything unparseable is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Parse a decimal typed by the user, accepting either `,` or `.` as the separator.
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(DECIMAL_SEPARATOR, ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
