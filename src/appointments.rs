/// Appointment list filtering and date navigation.
///
/// An appointment is visible when it passes all three rules:
/// - status: the filter is `All` or equals the appointment status
/// - text: the query is empty, or the patient name or reason contains it
///   (case-insensitive)
/// - date: same day (Day view), inside the closed week interval (Week view),
///   or unrestricted (Month view). A week that runs off chrono's date range
///   matches nothing.
///
/// Month view applies no date restriction. This matches the dashboard's
/// current behaviour and is a known gap.

use crate::calendar::{self, Direction, WeekStart};
use crate::error::{DashboardError, Result};
use crate::models::{Appointment, AppointmentStatus};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for ViewMode {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(DashboardError::unknown("view mode", value)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            value.parse().map(StatusFilter::Only)
        }
    }
}

/// View state of the Appointments page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub reference_date: NaiveDate,
    pub mode: ViewMode,
    pub status: StatusFilter,
    pub query: String,
    pub week_start: WeekStart,
}

impl AppointmentFilter {
    pub fn new(reference_date: NaiveDate) -> Self {
        AppointmentFilter {
            reference_date,
            mode: ViewMode::Day,
            status: StatusFilter::All,
            query: String::new(),
            week_start: WeekStart::Sunday,
        }
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    fn matches_text(&self, appointment: &Appointment) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        appointment.patient.name.to_lowercase().contains(&needle)
            || appointment.reason.to_lowercase().contains(&needle)
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        match self.mode {
            ViewMode::Day => date == self.reference_date,
            ViewMode::Week => calendar::week_bounds(self.reference_date, self.week_start)
                .is_some_and(|(start, end)| start <= date && date <= end),
            ViewMode::Month => true,
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.status.matches(appointment.status)
            && self.matches_text(appointment)
            && self.matches_date(appointment.date)
    }

    /// Visible appointments, in input order.
    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        let visible: Vec<&Appointment> = appointments.iter().filter(|a| self.matches(a)).collect();
        debug!(
            "{} view of {}: {} of {} appointments",
            self.mode,
            self.reference_date,
            visible.len(),
            appointments.len()
        );
        visible
    }

    /// Heading for the active range.
    pub fn range_label(&self) -> String {
        match self.mode {
            ViewMode::Day => calendar::day_label(self.reference_date),
            ViewMode::Week => calendar::week_label(self.reference_date, self.week_start),
            ViewMode::Month => calendar::month_label(self.reference_date),
        }
    }

    /// Step the reference date: one day in Day view, seven in Week view.
    /// Month view has no navigation.
    pub fn navigate(&mut self, direction: Direction) {
        let step = match self.mode {
            ViewMode::Day => 1,
            ViewMode::Week => 7,
            ViewMode::Month => return,
        };
        self.reference_date = calendar::shift(self.reference_date, direction, step);
    }

    /// Message shown when `apply` returns nothing.
    pub fn empty_message(&self) -> &'static str {
        if !self.query.is_empty() || self.status != StatusFilter::All {
            "Try adjusting your search or filter criteria"
        } else {
            "No appointments scheduled for this period"
        }
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 appointment".to_string()
    } else {
        format!("{} appointments", count)
    }
}

/// Appointments on `date`, for the "Today" quick stat.
pub fn count_on(appointments: &[Appointment], date: NaiveDate) -> usize {
    appointments.iter().filter(|a| a.date == date).count()
}

pub fn count_with_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(visible: &[&Appointment]) -> Vec<String> {
        visible.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn day_view_matches_exact_date() {
        let seed = SeedData::load().unwrap();

        let on_20th = AppointmentFilter::new(date(2024, 1, 20)).apply(&seed.appointments);
        assert_eq!(ids(&on_20th), vec!["app-001", "app-002", "app-003", "app-004"]);

        let on_21st = AppointmentFilter::new(date(2024, 1, 21)).apply(&seed.appointments);
        assert_eq!(ids(&on_21st), vec!["app-006"]);
        assert!(!on_21st.iter().any(|a| a.id == "app-001"));
    }

    #[test]
    fn week_view_is_inclusive_at_both_ends() {
        let seed = SeedData::load().unwrap();
        let mut appointments = seed.appointments.clone();
        appointments[0].date = date(2024, 1, 14);
        appointments[1].date = date(2024, 1, 20);
        appointments[2].date = date(2024, 1, 13);
        appointments[3].date = date(2024, 1, 21);

        let filter = AppointmentFilter::new(date(2024, 1, 17)).with_mode(ViewMode::Week);
        let visible = ids(&filter.apply(&appointments));
        assert!(visible.contains(&"app-001".to_string()));
        assert!(visible.contains(&"app-002".to_string()));
        assert!(!visible.contains(&"app-003".to_string()));
        assert!(!visible.contains(&"app-004".to_string()));
    }

    #[test]
    fn week_view_at_range_ends_matches_nothing() {
        let seed = SeedData::load().unwrap();
        let mut appointments = seed.appointments.clone();
        appointments[0].date = NaiveDate::MAX;
        appointments[1].date = NaiveDate::MIN;

        let latest = AppointmentFilter::new(NaiveDate::MAX).with_mode(ViewMode::Week);
        assert!(latest.apply(&appointments).is_empty());
        assert!(latest.range_label().starts_with("Week of "));

        let earliest = AppointmentFilter::new(NaiveDate::MIN)
            .with_mode(ViewMode::Week)
            .with_week_start(WeekStart::Monday);
        assert!(earliest.apply(&appointments).is_empty());

        let parsed = crate::models::parse_date("+262142-12-31").unwrap();
        let jumped = AppointmentFilter::new(parsed).with_mode(ViewMode::Week);
        assert!(jumped.apply(&appointments).is_empty());
    }

    #[test]
    fn month_view_applies_no_date_restriction() {
        let seed = SeedData::load().unwrap();
        let filter = AppointmentFilter::new(date(1999, 6, 1)).with_mode(ViewMode::Month);
        assert_eq!(filter.apply(&seed.appointments).len(), seed.appointments.len());
    }

    #[test]
    fn search_covers_name_and_reason_case_insensitively() {
        let seed = SeedData::load().unwrap();
        let base = AppointmentFilter::new(date(2024, 1, 1)).with_mode(ViewMode::Month);

        let by_name = base.clone().with_query("JOHN");
        assert_eq!(ids(&by_name.apply(&seed.appointments)), vec!["app-001", "app-006"]);

        let by_reason = base.with_query("ecg");
        assert_eq!(ids(&by_reason.apply(&seed.appointments)), vec!["app-003"]);
    }

    #[test]
    fn status_filter_combines_with_date() {
        let seed = SeedData::load().unwrap();
        let filter = AppointmentFilter::new(date(2024, 1, 20))
            .with_status(StatusFilter::Only(AppointmentStatus::InProgress));
        assert_eq!(ids(&filter.apply(&seed.appointments)), vec!["app-003"]);
        assert_eq!(filter.empty_message(), "Try adjusting your search or filter criteria");
    }

    #[test]
    fn navigation_steps_by_mode() {
        let mut filter = AppointmentFilter::new(date(2024, 1, 20));
        filter.navigate(Direction::Next);
        assert_eq!(filter.reference_date, date(2024, 1, 21));

        filter.mode = ViewMode::Week;
        filter.navigate(Direction::Prev);
        assert_eq!(filter.reference_date, date(2024, 1, 14));

        filter.mode = ViewMode::Month;
        filter.navigate(Direction::Next);
        assert_eq!(filter.reference_date, date(2024, 1, 14));
    }

    #[test]
    fn range_labels_per_mode() {
        let filter = AppointmentFilter::new(date(2024, 1, 20));
        assert_eq!(filter.range_label(), "Saturday, January 20, 2024");
        assert_eq!(filter.clone().with_mode(ViewMode::Week).range_label(), "Jan 14 - Jan 20, 2024");
        assert_eq!(filter.with_mode(ViewMode::Month).range_label(), "January 2024");
    }

    #[test]
    fn parses_filter_strings() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "no-show".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::NoShow)
        );
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert!("year".parse::<ViewMode>().is_err());
    }

    #[test]
    fn quick_stats_and_labels() {
        let seed = SeedData::load().unwrap();
        assert_eq!(count_on(&seed.appointments, date(2024, 1, 20)), 4);
        assert_eq!(count_with_status(&seed.appointments, AppointmentStatus::Scheduled), 4);
        assert_eq!(count_label(1), "1 appointment");
        assert_eq!(count_label(0), "0 appointments");
        assert_eq!(
            AppointmentFilter::new(date(2024, 1, 1)).empty_message(),
            "No appointments scheduled for this period"
        );
    }

    proptest! {
        #[test]
        fn day_view_returns_exactly_same_day_in_order(
            offsets in proptest::collection::vec(0i64..10, 0..30),
            reference in 0i64..10,
        ) {
            let seed = SeedData::load().unwrap();
            let origin = date(2024, 1, 15);
            let appointments: Vec<Appointment> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| Appointment {
                    id: format!("app-{}", i),
                    date: origin + chrono::Duration::days(*offset),
                    ..seed.appointments[i % seed.appointments.len()].clone()
                })
                .collect();
            let reference_date = origin + chrono::Duration::days(reference);

            let visible = AppointmentFilter::new(reference_date).apply(&appointments);
            let expected: Vec<&Appointment> =
                appointments.iter().filter(|a| a.date == reference_date).collect();
            prop_assert_eq!(visible, expected);
        }
    }
}
