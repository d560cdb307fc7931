//! Formatting utilities used for CLI and PDF outputs.

/// USD amount with two decimals and thousands separators, e.g. "$3,970.00".
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // sign follows the rounded value
    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}

/// Hours as a plain number: 40 -> "40", 37.5 -> "37.5".
pub fn format_hours(hours: f64) -> String {
    format!("{}", hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(3970.0), "$3,970.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(65.0), "$65.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1500.5), "-$1,500.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn hours_drop_trailing_zero_fraction() {
        assert_eq!(format_hours(40.0), "40");
        assert_eq!(format_hours(37.5), "37.5");
    }
}
