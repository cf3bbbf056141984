//! Display formatting for metric tiles and chart captions.
//!
//! Presentation only: aggregates stay unrounded, these helpers round at
//! the last moment.

use serde::Serialize;

/// How a metric tile renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricFormat {
    /// Whole number with thousands separators.
    Count,
    /// `$` prefix, thousands separators.
    Currency { decimals: usize },
    /// Thousands separators, fixed decimals.
    Number { decimals: usize },
}

impl MetricFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            MetricFormat::Count => format_number(value, 0),
            MetricFormat::Currency { decimals } => format_currency(value, decimals),
            MetricFormat::Number { decimals } => format_number(value, decimals),
        }
    }
}

/// `1234567.891, 2` → `"1,234,567.89"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// `-1234.4, 0` → `"-$1,234"`.
pub fn format_currency(value: f64, decimals: usize) -> String {
    let body = format_number(value, decimals);
    match body.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-9876543.0, 0), "-9,876,543");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(350.0, 0), "$350");
        assert_eq!(format_currency(116.666_666, 2), "$116.67");
        assert_eq!(format_currency(-1234.4, 0), "-$1,234");
    }

    #[test]
    fn metric_formats() {
        assert_eq!(MetricFormat::Count.format(12345.0), "12,345");
        assert_eq!(MetricFormat::Number { decimals: 2 }.format(13.4567), "13.46");
        assert_eq!(MetricFormat::Currency { decimals: 0 }.format(1_500_000.0), "$1,500,000");
    }
}
