//! Text formatting shared by the review view, the welcome message and the
//! income slider.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static DOUBLED_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*,").expect("Invalid comma regex"));

static SSN_PARTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{3})-([0-9]{2})-([0-9]{4})$").expect("Invalid SSN parts regex")
});

/// Format an amount given in thousands of dollars: `350` → `$350,000`.
pub fn format_currency(thousands: i64) -> String {
    let dollars = thousands.saturating_mul(1000);
    let digits = dollars.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if dollars < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Parse a slider value and format it, `None` when it is not a number.
pub fn format_income(value: &str) -> Option<String> {
    value.trim().parse::<i64>().ok().map(format_currency)
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Collapse `, ,` left behind by an empty middle part.
pub fn collapse_commas(text: &str) -> String {
    DOUBLED_COMMA_REGEX.replace_all(text, ",").trim().to_string()
}

/// `123-45-6789` → `***-**-6789`. Other input is returned unchanged.
pub fn mask_ssn(ssn: &str) -> String {
    SSN_PARTS_REGEX.replace(ssn, "***-**-$3").to_string()
}

/// US short date: `6/1/2024`.
pub fn us_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(350), "$350,000");
        assert_eq!(format_currency(1), "$1,000");
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(1500), "$1,500,000");
        assert_eq!(format_income(" 200 ").as_deref(), Some("$200,000"));
        assert!(format_income("abc").is_none());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("<b>O'Neil & co</b>"), "&lt;b&gt;O&#39;Neil &amp; co&lt;/b&gt;");
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse_whitespace("  Pat   Q  Smith "), "Pat Q Smith");
        assert_eq!(collapse_commas(", TX 77002"), ", TX 77002");
        assert_eq!(collapse_commas("Houston, , 77002"), "Houston, 77002");
    }

    #[test]
    fn test_mask_ssn() {
        assert_eq!(mask_ssn("123-45-6789"), "***-**-6789");
        assert_eq!(mask_ssn("123456789"), "123456789");
    }

    #[test]
    fn test_us_date() {
        assert_eq!(us_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()), "6/1/2024");
    }
}
