/// Calendar arithmetic shared by the Appointments and Schedule pages.
///
/// All dates are local calendar dates (`NaiveDate`); no timezone
/// normalization happens anywhere in the dashboard.

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use log::warn;
use serde::{Deserialize, Serialize};

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Direction of a prev/next navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn sign(&self) -> i64 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Closed interval `[start, end]` of the week containing `date`.
///
/// `None` when the week runs past either end of chrono's date range.
pub fn week_bounds(date: NaiveDate, week_start: WeekStart) -> Option<(NaiveDate, NaiveDate)> {
    let offset = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    let start = date.checked_sub_days(Days::new(u64::from(offset)))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

/// The seven dates of the week containing `date`, in order. Empty when the
/// week is not representable.
pub fn week_days(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    match week_bounds(date, week_start) {
        Some((start, _)) => start.iter_days().take(7).collect(),
        None => {
            warn!("Week of {} is out of range", date);
            Vec::new()
        }
    }
}

/// Move `date` by `days` in `direction`.
///
/// Returns the original date when the result would leave chrono's
/// representable range.
pub fn shift(date: NaiveDate, direction: Direction, days: i64) -> NaiveDate {
    match date.checked_add_signed(Duration::days(direction.sign() * days)) {
        Some(moved) => moved,
        None => {
            warn!("Date navigation out of range from {}", date);
            date
        }
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// "Saturday, January 20, 2024"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "Jan 14 - Jan 20, 2024"
pub fn week_label(date: NaiveDate, week_start: WeekStart) -> String {
    match week_bounds(date, week_start) {
        Some((start, end)) => format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y")),
        None => format!("Week of {}", date.format("%b %-d, %Y")),
    }
}

/// "January 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
