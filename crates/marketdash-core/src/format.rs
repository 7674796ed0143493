//! Presentation formatting for raw API strings.
//!
//! Alpha Vantage sends numbers as strings. Parsing here is prefix-based, so
//! `"12.5%"` reads as `12.5` and `"None"` is unparsable. Every helper returns
//! [`NOT_AVAILABLE`] instead of failing.

use serde::{Deserialize, Serialize};

/// Placeholder shown for missing or unparsable values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Polarity of a price change, used for color and arrow choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

/// Coarse session state derived from the free-text `current_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPhase {
    Open,
    Closed,
    Other,
}

/// A change is negative iff its text contains a minus sign, so `"-0.00%"`
/// is `Down` while `"0.00%"` is `Up`.
pub fn classify_change(change_percent: &str) -> ChangeDirection {
    if change_percent.contains('-') {
        ChangeDirection::Down
    } else {
        ChangeDirection::Up
    }
}

pub fn classify_market_status(status: &str) -> MarketPhase {
    let lower = status.to_lowercase();
    if lower.contains("open") {
        MarketPhase::Open
    } else if lower.contains("closed") {
        MarketPhase::Closed
    } else {
        MarketPhase::Other
    }
}

/// Market capitalization with a T/B/M suffix, e.g. `$1.50T`.
pub fn format_market_cap(raw: &str) -> String {
    let Some(value) = parse_number(raw) else {
        return NOT_AVAILABLE.to_owned();
    };

    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${}", group_decimal(value, 3, 0))
    }
}

/// Positive ratio with two decimals (P/E); zero, negative or unparsable is `N/A`.
pub fn format_ratio(raw: &str) -> String {
    match parse_number(raw) {
        Some(value) if value > 0.0 => format!("{value:.2}"),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Dividend yield given as a fraction, shown as a percentage.
pub fn format_dividend_yield(raw: &str) -> String {
    match parse_number(raw) {
        Some(value) if value > 0.0 => format!("{:.2}%", value * 100.0),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Two-decimal value that may be negative (EPS, Beta).
pub fn format_fixed(raw: &str) -> String {
    parse_number(raw)
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Dollar amount with two decimals and no grouping.
pub fn format_price(raw: &str) -> String {
    parse_number(raw)
        .map(|value| format!("${value:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// US dollar amount with grouping, e.g. `$1,234.50` or `-$3.20`.
///
/// The sign follows the input, so a negative amount that rounds to zero
/// still reads `-$0.00`.
pub fn format_currency(raw: &str) -> String {
    let Some(value) = parse_number(raw) else {
        return NOT_AVAILABLE.to_owned();
    };
    let body = group_decimal(value.abs(), 2, 2);
    if value.is_sign_negative() {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Share volume as a grouped integer, e.g. `52,164,535`.
pub fn format_volume(raw: &str) -> String {
    parse_integer(raw)
        .map(|value| {
            let grouped = group_digits(&value.unsigned_abs().to_string());
            if value < 0 {
                format!("-{grouped}")
            } else {
                grouped
            }
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Parse the leading decimal number of `raw`, ignoring any trailing text.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
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

    trimmed[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the leading integer of `raw`; a fractional part is truncated.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    trimmed[..end].parse::<i64>().ok()
}

/// Format with thousands separators and between `min_frac` and `max_frac`
/// fraction digits.
fn group_decimal(value: f64, max_frac: usize, min_frac: usize) -> String {
    let fixed = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.trim_end_matches('0').to_owned();
    while frac.len() < min_frac {
        frac.push('0');
    }

    let mut out = String::new();
    if value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac.trim_matches('0').is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cap_scales_to_suffix() {
        assert_eq!(format_market_cap("1500000000000"), "$1.50T");
        assert_eq!(format_market_cap("2500000"), "$2.50M");
        assert_eq!(format_market_cap("3450000000"), "$3.45B");
        assert_eq!(format_market_cap("abc"), "N/A");
    }

    #[test]
    fn small_market_cap_is_grouped_plain_number() {
        assert_eq!(format_market_cap("950000"), "$950,000");
        assert_eq!(format_market_cap("1234.5"), "$1,234.5");
    }

    #[test]
    fn dividend_yield_is_scaled_to_percent() {
        assert_eq!(format_dividend_yield("0.0065"), "0.65%");
        assert_eq!(format_dividend_yield("0"), "N/A");
        assert_eq!(format_dividend_yield("None"), "N/A");
    }

    #[test]
    fn pe_ratio_requires_positive_value() {
        assert_eq!(format_ratio("29.384"), "29.38");
        assert_eq!(format_ratio("-4.1"), "N/A");
        assert_eq!(format_ratio("-"), "N/A");
    }

    #[test]
    fn eps_and_beta_keep_sign() {
        assert_eq!(format_fixed("-1.234"), "-1.23");
        assert_eq!(format_fixed("1.2"), "1.20");
        assert_eq!(format_fixed("None"), "N/A");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency("189.8400"), "$189.84");
        assert_eq!(format_currency("1234567.891"), "$1,234,567.89");
        assert_eq!(format_currency("-3.2"), "-$3.20");
        assert_eq!(format_currency(""), "N/A");
    }

    #[test]
    fn currency_keeps_sign_of_tiny_losses() {
        assert_eq!(format_currency("-0.001"), "-$0.00");
        assert_eq!(format_currency("-0.004"), "-$0.00");
        assert_eq!(format_currency("0.004"), "$0.00");
        assert_eq!(format_currency("-0.01"), "-$0.01");
    }

    #[test]
    fn volume_is_grouped_integer() {
        assert_eq!(format_volume("52164535"), "52,164,535");
        assert_eq!(format_volume("999"), "999");
        assert_eq!(format_volume("1000.7"), "1,000");
        assert_eq!(format_volume("n/a"), "N/A");
    }

    #[test]
    fn change_classification_is_textual() {
        assert_eq!(classify_change("-1.23%"), ChangeDirection::Down);
        assert_eq!(classify_change("1.23%"), ChangeDirection::Up);
        assert_eq!(classify_change("-0.00%"), ChangeDirection::Down);
        assert_eq!(classify_change("0.00%"), ChangeDirection::Up);
    }

    #[test]
    fn market_status_text_maps_to_phase() {
        assert_eq!(classify_market_status("Open"), MarketPhase::Open);
        assert_eq!(classify_market_status("closed"), MarketPhase::Closed);
        assert_eq!(classify_market_status("early trading"), MarketPhase::Other);
    }

    #[test]
    fn number_parsing_reads_leading_prefix() {
        assert_eq!(parse_number("12.5%"), Some(12.5));
        assert_eq!(parse_number(" 1e3x"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_integer("42.9"), Some(42));
        assert_eq!(parse_integer("x42"), None);
    }
}
