//! Date arithmetic and formatting for the calendar views.
//!
//! Everything here is pure and goes through chrono's calendar arithmetic, so
//! month lengths and leap years never need to be spelled out by hand.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use korvo_shared::CurrentDateResponse;

/// Weekdays in the order the calendar columns are drawn
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Column index of a weekday in a Monday-first week (Sunday is the last column)
pub fn day_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

/// Inverse of [`day_index`]; `None` for anything outside 0..=6
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEK_ORDER.get(index as usize).copied()
}

/// Get the number of days in a given month, `0` if the month does not exist
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(0)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let remaining = days_in_month(date.year(), date.month()).saturating_sub(date.day());
    date + Duration::days(i64::from(remaining))
}

/// Day cells of the month containing `cursor`.
///
/// The grid is left-padded with `None` so the 1st sits under its Monday-first
/// column, then holds one entry per day. Rows end at month end, there is no
/// trailing padding.
pub fn month_grid(cursor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(cursor);
    let padding = day_index(first.weekday()) as usize;
    let days = days_in_month(first.year(), first.month()) as usize;

    let mut cells = vec![None; padding];
    cells.extend(first.iter_days().take(days).map(Some));
    cells
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven consecutive days of the week containing `cursor`, Monday first
pub fn week_days(cursor: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(cursor);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn weekday_short_name(weekday: Weekday) -> &'static str {
    &weekday_name(weekday)[..3]
}

/// ISO calendar date (`YYYY-MM-DD`), the key appointments are stored under
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a strictly formatted `YYYY-MM-DD` date.
///
/// Unpadded input such as `2024-6-28` is rejected so that a parsed date always
/// round-trips to the same string it was stored under.
pub fn parse_iso_date(date_str: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
    (to_iso(date) == date_str).then_some(date)
}

/// Month header, e.g. "June 2024"
pub fn format_month_title(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

/// Week header for the week containing `date`.
///
/// "24 - 30 June 2024", "29 July - 4 August 2024" or
/// "30 December 2024 - 5 January 2025" depending on what the week spans.
pub fn format_week_range(date: NaiveDate) -> String {
    let start = week_start(date);
    let end = start + Duration::days(6);

    if start.year() != end.year() {
        format!(
            "{} {} {} - {} {} {}",
            start.day(), month_name(start.month()), start.year(),
            end.day(), month_name(end.month()), end.year()
        )
    } else if start.month() != end.month() {
        format!(
            "{} {} - {} {} {}",
            start.day(), month_name(start.month()),
            end.day(), month_name(end.month()), end.year()
        )
    } else {
        format!("{} - {} {} {}", start.day(), end.day(), month_name(end.month()), end.year())
    }
}

/// Format a date for human-readable display, e.g. "June 28, 2024"
pub fn format_date_for_display(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// e.g. "Friday, June 28, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), format_date_for_display(date))
}

/// Get current date information
pub fn current_date() -> CurrentDateResponse {
    let today = Local::now().date_naive();

    CurrentDateResponse {
        month: today.month(),
        year: today.year(),
        day: today.day(),
        formatted_date: format_date_for_display(today),
        iso_date: to_iso(today),
    }
}
