use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::errors::{Error, Result};

/// The local calendar date used as "today" for period defaults.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last day of the given calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((first, last))
}

/// Monday through Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let monday = date - Duration::days(offset);
    (monday, monday + Duration::days(6))
}

pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// The `count` calendar months ending with the month of `today`, oldest first.
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(count as usize);
    let mut year = today.year();
    let mut month = today.month();
    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

/// Rejects ranges whose start lies after their end.
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(Error::invalid_input(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
    }
    Ok(())
}
