use chrono::NaiveDate;
use clinic_dashboard::appointments::{AppointmentFilter, StatusFilter, ViewMode};
use clinic_dashboard::calendar::{Direction, WeekStart};
use clinic_dashboard::config::DashboardConfig;
use clinic_dashboard::layout::{LayoutShell, Page};
use clinic_dashboard::lifecycle::{StatusAction, StatusBoard};
use clinic_dashboard::models::AppointmentStatus;
use clinic_dashboard::patients::{GenderFilter, PatientQuery, PatientSort};
use clinic_dashboard::schedule::{RetentionMode, ScheduleEditor};
use clinic_dashboard::seed::SeedData;
use clinic_dashboard::DashboardError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn appointment_present_on_its_day_only() {
    let seed = SeedData::load().unwrap();
    let app = seed.appointment("app-001").unwrap();
    assert_eq!(app.date, date(2024, 1, 20));
    assert_eq!(app.status, AppointmentStatus::Scheduled);

    let mut filter = AppointmentFilter::new(date(2024, 1, 20));
    assert!(filter.apply(&seed.appointments).iter().any(|a| a.id == "app-001"));

    filter.navigate(Direction::Next);
    assert_eq!(filter.reference_date, date(2024, 1, 21));
    assert!(!filter.apply(&seed.appointments).iter().any(|a| a.id == "app-001"));
}

#[test]
fn status_changes_flow_into_the_filtered_view() {
    let seed = SeedData::load().unwrap();
    let mut board = StatusBoard::new();
    let first = seed.appointment("app-001").unwrap();
    let second = seed.appointment("app-002").unwrap();

    board.apply(first, StatusAction::Start).unwrap();
    board.apply(second, StatusAction::Cancel).unwrap();
    let err = board.apply(second, StatusAction::Complete).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidTransition { .. }));

    let view = board.view(&seed.appointments);
    let in_progress = AppointmentFilter::new(date(2024, 1, 20))
        .with_status(StatusFilter::Only(AppointmentStatus::InProgress))
        .apply(&view);
    let ids: Vec<&str> = in_progress.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["app-001", "app-003"]);

    let cancelled = AppointmentFilter::new(date(2024, 1, 1))
        .with_mode(ViewMode::Month)
        .with_status("cancelled".parse().unwrap())
        .apply(&view);
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].payment_status, second.payment_status);
}

#[test]
fn week_view_follows_configured_week_start() {
    let seed = SeedData::load().unwrap();
    let sunday_week = AppointmentFilter::new(date(2024, 1, 21))
        .with_mode(ViewMode::Week)
        .apply(&seed.appointments);
    assert_eq!(sunday_week.len(), 1);

    let monday_week = AppointmentFilter::new(date(2024, 1, 21))
        .with_mode(ViewMode::Week)
        .with_week_start(WeekStart::Monday)
        .apply(&seed.appointments);
    assert_eq!(monday_week.len(), 6);
}

#[test]
fn patient_directory_combines_search_gender_and_sort() {
    let seed = SeedData::load().unwrap();
    let query = PatientQuery::new()
        .with_search("@email.com")
        .with_gender(GenderFilter::Only(clinic_dashboard::models::Gender::Male))
        .with_sort(PatientSort::Age);
    let names: Vec<&str> = query.apply(&seed.patients).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ahmed Rahman", "John Doe", "Michael Chen"]);
}

#[test]
fn schedule_round_trip_shows_same_dates() {
    let config: DashboardConfig = serde_json::from_str(r#"{"today": "2024-01-20"}"#).unwrap();
    let (start, end) = config.new_slot_range().unwrap();
    let mut editor = ScheduleEditor::new(config.today(), config.week_start, config.schedule_retention)
        .with_new_slot_range(start, end);
    assert_eq!(editor.retention(), RetentionMode::Reset);

    let dates = editor.dates();
    editor.add_slot(date(2024, 1, 16)).unwrap();
    editor.navigate_week(Direction::Next);
    editor.navigate_week(Direction::Prev);
    assert_eq!(editor.dates(), dates);
    assert_eq!(editor.selected_week(), date(2024, 1, 20));
}

#[test]
fn modal_signal_is_shared_between_pages_and_shell() {
    let seed = SeedData::load().unwrap();
    let mut shell = LayoutShell::new(&seed.notifications);
    let appointments_modal = shell.modal_signal();

    shell.navigate(Page::Appointments);
    appointments_modal.open();
    assert!(!shell.sidebar_visible());

    let target = seed.notifications[0].action_url.unwrap();
    assert_eq!(shell.navigate_to_path(target.path()).unwrap(), Page::Appointments);

    appointments_modal.close();
    assert!(shell.sidebar_visible());
}
