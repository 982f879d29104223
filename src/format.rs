//! Display formatting for currency, timestamps and search text

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Format an amount in Vietnamese đồng: `1.500.000 ₫`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{} ₫", grouped)
    } else {
        format!("{} ₫", grouped)
    }
}

/// Same as [`format_currency`], with a dash for a missing amount
pub fn format_optional_currency(amount: Option<Decimal>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "-".to_string())
}

/// Parse a backend timestamp: RFC 3339, or naive ISO with `T` or a space
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `dd/mm/yyyy HH:MM`, or the raw text when it cannot be parsed
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `dd/mm/yyyy`, or the raw text when it cannot be parsed
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_optional_datetime(raw: Option<&str>) -> String {
    raw.map(format_datetime).unwrap_or_else(|| "-".to_string())
}

/// Lowercase and strip Vietnamese diacritics so "Nguyễn" matches "nguyen"
pub fn normalize_search(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// True when every whitespace-separated term of `query` occurs in `text`
pub fn matches_search(text: &str, query: &str) -> bool {
    let haystack = normalize_search(text);
    normalize_search(query)
        .split_whitespace()
        .all(|term| haystack.contains(term))
}
