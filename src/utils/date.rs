use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("'{s}' (expected YYYY-MM-DD)")))
}

/// The week-ending Friday on or after `d`.
pub fn week_ending_for(d: NaiveDate) -> NaiveDate {
    let from_monday = d.weekday().num_days_from_monday() as i64;
    let friday = Weekday::Fri.num_days_from_monday() as i64;
    let delta = (friday - from_monday).rem_euclid(7);
    d + Duration::days(delta)
}

pub fn current_week_ending() -> NaiveDate {
    week_ending_for(today())
}

/// Short US style date, e.g. "Mar 15, 2023".
pub fn format_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    format_date(dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_month_day_year() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 5).unwrap();
        assert_eq!(format_date(d), "Mar 5, 2023");
        let d = NaiveDate::from_ymd_opt(2023, 12, 15).unwrap();
        assert_eq!(format_date(d), "Dec 15, 2023");
    }

    #[test]
    fn week_ending_rolls_forward_to_friday() {
        // 2023-03-13 is a Monday
        let mon = NaiveDate::from_ymd_opt(2023, 3, 13).unwrap();
        let fri = NaiveDate::from_ymd_opt(2023, 3, 17).unwrap();
        assert_eq!(week_ending_for(mon), fri);
        assert_eq!(week_ending_for(fri), fri);

        let sat = NaiveDate::from_ymd_opt(2023, 3, 18).unwrap();
        assert_eq!(
            week_ending_for(sat),
            NaiveDate::from_ymd_opt(2023, 3, 24).unwrap()
        );
    }

    #[test]
    fn rejects_non_iso_dates() {
        assert!(parse_date("03/15/2023").is_err());
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date(" 2023-03-15 ").is_ok());
    }
}
