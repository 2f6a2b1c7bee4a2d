use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Monday of the week containing the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First day of the month containing the given date.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Validate a `--period` filter: a year ("2026"), a month ("2026-03") or a
/// single day ("2026-03-02"). Returns the SQL condition on the `date` column
/// together with its parameter, or None for an unsupported shape.
pub fn period_filter(period: &str) -> Option<(&'static str, String)> {
    match period.len() {
        4 if period.parse::<i32>().is_ok() => {
            Some(("strftime('%Y', date) = ?", period.to_string()))
        }
        7 if parse_date(&format!("{period}-01")).is_some() => {
            Some(("strftime('%Y-%m', date) = ?", period.to_string()))
        }
        10 if parse_date(period).is_some() => Some(("date = ?", period.to_string())),
        _ => None,
    }
}
