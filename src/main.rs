/// Command-line front end for the practice dashboard.
///
/// Each main-menu entry opens one dashboard page with its own sub-menu for
/// filtering, navigation and local edits. All edits are discarded on exit.

use clinic_dashboard::analytics;
use clinic_dashboard::appointments::{self, AppointmentFilter, StatusFilter, ViewMode};
use clinic_dashboard::calendar::Direction;
use clinic_dashboard::config::DashboardConfig;
use clinic_dashboard::layout::{LayoutShell, ModalSignal, Page};
use clinic_dashboard::lifecycle::{StatusAction, StatusBoard};
use clinic_dashboard::models::{parse_date, Appointment, AppointmentStatus, Patient};
use clinic_dashboard::patients::{GenderFilter, PatientQuery, PatientSort};
use clinic_dashboard::prescriptions::{
    PrescriptionDraft, PrescriptionFilter, PrescriptionStats, PrescriptionStatusFilter,
};
use clinic_dashboard::profile::{ProfileEditor, ProfileField};
use clinic_dashboard::schedule::ScheduleEditor;
use clinic_dashboard::seed::SeedData;
use clinic_dashboard::settings::SettingsPage;
use clinic_dashboard::Result;
use log::error;
use std::io::{self, Write};

struct DashboardCli {
    seed: SeedData,
    config: DashboardConfig,
    shell: LayoutShell,
    modal: ModalSignal,
    appointment_filter: AppointmentFilter,
    status_board: StatusBoard,
    patient_query: PatientQuery,
    schedule: ScheduleEditor,
    prescription_filter: PrescriptionFilter,
    profile: ProfileEditor,
    settings: SettingsPage,
    running: bool,
}

impl DashboardCli {
    fn new(seed: SeedData, config: DashboardConfig) -> Result<Self> {
        let today = config.today();
        let (slot_start, slot_end) = config.new_slot_range()?;
        let shell = LayoutShell::new(&seed.notifications);
        let modal = shell.modal_signal();
        let appointment_filter = AppointmentFilter::new(today)
            .with_mode(config.default_view)
            .with_week_start(config.week_start);
        let schedule = ScheduleEditor::new(today, config.week_start, config.schedule_retention)
            .with_new_slot_range(slot_start, slot_end);
        let profile = ProfileEditor::new(&seed.doctor);

        Ok(DashboardCli {
            seed,
            config,
            shell,
            modal,
            appointment_filter,
            status_board: StatusBoard::new(),
            patient_query: PatientQuery::new(),
            schedule,
            prescription_filter: PrescriptionFilter::default(),
            profile,
            settings: SettingsPage::new(),
            running: true,
        })
    }

    fn print_header(&self) {
        let doctor = self.profile.doctor();
        println!("\n{}", "=".repeat(60));
        println!("       PRACTICE DASHBOARD - {}", doctor.name);
        println!(
            "       {} | {} | {} unread notifications",
            doctor.specialty,
            doctor.status,
            self.shell.unread_notifications()
        );
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ({}) ---", self.shell.current_page());
        if self.shell.sidebar_visible() {
            for (i, page) in Page::ALL.iter().enumerate() {
                println!("{}. {:14} {}", i + 1, page.title(), page.path());
            }
        }
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&mut self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => {
                self.running = false;
                return default.unwrap_or("").to_string();
            }
            Ok(_) => {}
        }
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&mut self, prompt: &str, default: Option<i32>) -> i32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());
            if let Ok(value) = input.parse::<i32>() {
                return value;
            }
            if !self.running {
                return 0;
            }
            println!("Please enter a valid number");
        }
    }

    fn open_page(&mut self, page: Page) {
        self.shell.navigate(page);
        match page {
            Page::Dashboard => self.show_dashboard(),
            Page::Appointments => self.appointments_page(),
            Page::Patients => self.patients_page(),
            Page::Schedule => self.schedule_page(),
            Page::Analytics => self.show_analytics(),
            Page::Revenue => self.show_revenue(),
            Page::Prescriptions => self.prescriptions_page(),
            Page::Profile => self.profile_page(),
            Page::Settings => self.settings_page(),
        }
    }

    fn show_dashboard(&self) {
        let today = self.config.today();
        let stats = &self.seed.stats;
        println!("\n--- Dashboard ---");
        println!("  Total patients:        {}", stats.total_patients);
        println!("  Today's appointments:  {}", stats.today_appointments);
        println!(
            "  Completed today:       {} ({}%)",
            stats.completed_today,
            analytics::completion_rate(stats)
        );
        println!("  Today's revenue:       {}", stats.revenue.today);
        println!("  Satisfaction:          {:.1}", stats.patient_satisfaction);
        println!("  Average wait:          {} min", stats.average_wait_minutes);

        let todays = analytics::todays_appointments(&self.seed.appointments, today);
        println!("\nToday's schedule ({}):", appointments::count_label(todays.len()));
        if todays.is_empty() {
            println!("  No appointments scheduled for today");
        }
        for apt in todays {
            println!(
                "  {} - {} ({})",
                apt.time_label(),
                apt.patient.name,
                self.status_board.status_of(apt).label()
            );
        }
    }

    fn print_appointments(&self) {
        let filter = &self.appointment_filter;
        let view = self.status_board.view(&self.seed.appointments);
        let visible = filter.apply(&view);

        println!("\n--- Appointments: {} ---", filter.range_label());
        println!(
            "  View: {} | Status: {:?} | Search: '{}' | {}",
            filter.mode,
            filter.status,
            filter.query,
            appointments::count_label(visible.len())
        );
        println!(
            "  Today: {} | Scheduled: {}",
            appointments::count_on(&view, self.config.today()),
            appointments::count_with_status(&view, AppointmentStatus::Scheduled)
        );

        if visible.is_empty() {
            println!("\n  {}", filter.empty_message());
            return;
        }
        for (i, apt) in visible.iter().enumerate() {
            println!(
                "  {}. [{}] {} {} - {} ({}, {}) fee {} {}",
                i + 1,
                apt.id,
                apt.date,
                apt.time_label(),
                apt.patient.name,
                apt.kind,
                apt.status.label(),
                apt.fee,
                apt.payment_status
            );
            println!("     {}", apt.reason);
        }
    }

    fn appointments_page(&mut self) {
        loop {
            self.print_appointments();
            println!("\n1. Previous  2. Next  3. View mode  4. Status filter  5. Search");
            println!("6. Jump to date  7. Details  8. Change status  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => self.appointment_filter.navigate(Direction::Prev),
                2 => self.appointment_filter.navigate(Direction::Next),
                3 => {
                    let mode = self.get_input("View (day/week/month)", Some("day"));
                    match mode.parse::<ViewMode>() {
                        Ok(mode) => self.appointment_filter.mode = mode,
                        Err(e) => println!("{}", e),
                    }
                }
                4 => {
                    let status = self.get_input(
                        "Status (all/scheduled/in-progress/completed/cancelled/no-show)",
                        Some("all"),
                    );
                    match status.parse::<StatusFilter>() {
                        Ok(status) => self.appointment_filter.status = status,
                        Err(e) => println!("{}", e),
                    }
                }
                5 => self.appointment_filter.query = self.get_input("Search patients or reasons", Some("")),
                6 => {
                    let input = self.get_input("Date (YYYY-MM-DD)", None);
                    match parse_date(&input) {
                        Ok(date) => self.appointment_filter.reference_date = date,
                        Err(e) => println!("{}", e),
                    }
                }
                7 => {
                    if let Some(apt) = self.pick_appointment() {
                        self.show_appointment_modal(&apt);
                    }
                }
                8 => self.change_status(),
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn pick_appointment(&mut self) -> Option<Appointment> {
        let id = self.get_input("Appointment id", None);
        let found = self.seed.appointment(&id).cloned();
        if found.is_none() {
            println!("Appointment '{}' not found", id);
        }
        found
    }

    fn show_appointment_modal(&mut self, apt: &Appointment) {
        self.modal.open();
        let status = self.status_board.status_of(apt);
        println!("\n--- Appointment Details ---");
        println!("  Patient:   {} ({}, {} yrs, {})", apt.patient.name, apt.patient.gender, apt.patient.age, apt.patient.blood_type);
        println!("  Contact:   {} / {}", apt.patient.phone, apt.patient.email);
        println!("  Address:   {}", apt.patient.address);
        println!("  When:      {} {} ({} min)", apt.date, apt.time_label(), apt.duration_minutes);
        println!("  Type:      {}", apt.kind);
        println!("  Status:    {}", status.label());
        println!("  Reason:    {}", apt.reason);
        if let Some(notes) = &apt.notes {
            println!("  Notes:     {}", notes);
        }
        if let Some(diagnosis) = &apt.diagnosis {
            println!("  Diagnosis: {}", diagnosis);
        }
        println!("  Fee:       {} ({})", apt.fee, apt.payment_status);
        self.get_input("Press enter to close", Some(""));
        self.modal.close();
    }

    fn change_status(&mut self) {
        let Some(apt) = self.pick_appointment() else {
            return;
        };
        let actions = StatusAction::available_for(self.status_board.status_of(&apt));
        if actions.is_empty() {
            println!("No status changes available for this appointment");
            return;
        }
        for (i, action) in actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action.label());
        }
        let choice = self.get_int_input("Action", Some(0));
        if choice < 1 || choice as usize > actions.len() {
            return;
        }
        match self.status_board.apply(&apt, actions[choice as usize - 1]) {
            Ok(change) => println!("{}: {} -> {}", change.appointment_id, change.from, change.to),
            Err(e) => println!("{}", e),
        }
    }

    fn patients_page(&mut self) {
        loop {
            let visible: Vec<Patient> = self
                .patient_query
                .apply(&self.seed.patients)
                .into_iter()
                .cloned()
                .collect();
            println!("\n--- Patients ({} shown) ---", visible.len());
            if visible.is_empty() {
                println!("  No patients found");
            }
            for patient in &visible {
                println!(
                    "  [{}] {:15} {:3} yrs {:6} {:4} last visit {} ({} visits)",
                    patient.id,
                    patient.name,
                    patient.age,
                    patient.gender,
                    patient.blood_type,
                    patient.last_visit,
                    patient.total_visits
                );
            }

            println!("\n1. Search  2. Gender filter  3. Sort  4. Details  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => self.patient_query.search = self.get_input("Search name, email or phone", Some("")),
                2 => {
                    let gender = self.get_input("Gender (all/male/female/other)", Some("all"));
                    match gender.parse::<GenderFilter>() {
                        Ok(gender) => self.patient_query.gender = gender,
                        Err(e) => println!("{}", e),
                    }
                }
                3 => {
                    let sort = self.get_input("Sort (name/age/last-visit)", Some("name"));
                    match sort.parse::<PatientSort>() {
                        Ok(sort) => self.patient_query.sort = sort,
                        Err(e) => println!("{}", e),
                    }
                }
                4 => {
                    let id = self.get_input("Patient id", None);
                    match self.seed.patient(&id).cloned() {
                        Some(patient) => self.show_patient_modal(&patient),
                        None => println!("Patient '{}' not found", id),
                    }
                }
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn show_patient_modal(&mut self, patient: &Patient) {
        self.modal.open();
        println!("\n--- {} ---", patient.name);
        println!("  {} / {} / {}", patient.email, patient.phone, patient.address);
        println!("  Emergency contact: {}", patient.emergency_contact);
        println!("  History:     {}", patient.medical_history.join(", "));
        println!("  Allergies:   {}", patient.allergies.join(", "));
        println!("  Medications: {}", patient.current_medications.join(", "));
        self.get_input("Press enter to close", Some(""));
        self.modal.close();
    }

    fn schedule_page(&mut self) {
        loop {
            println!("\n--- Schedule: {} ---", self.schedule.week_label());
            for day in self.schedule.days() {
                println!(
                    "  {} {:9} {}",
                    day.date,
                    day.day_name(),
                    if day.is_working { "working" } else { "off" }
                );
                if day.is_working {
                    for slot in &day.slots {
                        println!(
                            "      {} {} [{}]",
                            slot.label(),
                            if slot.available { "available" } else { "blocked" },
                            slot.id
                        );
                    }
                }
                for (a, b) in self.schedule.overlapping_slots(day.date) {
                    println!("      ! overlap: {} / {}", a, b);
                }
            }

            println!("\n1. Previous week  2. Next week  3. Toggle working day  4. Add slot");
            println!("5. Remove slot  6. Toggle slot  7. Save changes  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => self.schedule.navigate_week(Direction::Prev),
                2 => self.schedule.navigate_week(Direction::Next),
                action @ 3..=6 => self.edit_schedule_day(action),
                7 => {
                    let summary = self.schedule.save();
                    println!(
                        "Saved {}: {} working days, {} slots",
                        summary.week_label, summary.working_days, summary.total_slots
                    );
                }
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn edit_schedule_day(&mut self, action: i32) {
        let input = self.get_input("Date (YYYY-MM-DD)", None);
        let date = match parse_date(&input) {
            Ok(date) => date,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        let changed = match action {
            3 => self.schedule.toggle_working_day(date),
            4 => self.schedule.add_slot(date).is_some(),
            5 | 6 => {
                let raw = self.get_input("Slot id", None);
                match raw.parse::<uuid::Uuid>() {
                    Ok(id) if action == 5 => self.schedule.remove_slot(date, id),
                    Ok(id) => self.schedule.toggle_slot_availability(date, id),
                    Err(_) => false,
                }
            }
            _ => false,
        };
        if !changed {
            println!("Nothing changed (date not in this week or slot not found)");
        }
    }

    fn show_analytics(&self) {
        println!("\n--- Analytics ---");
        let demographics = analytics::demographics(&self.seed.patients);
        println!(
            "  Patients: {} male, {} female, {} other",
            demographics.male, demographics.female, demographics.other
        );
        for (group, count) in analytics::age_groups(&self.seed.patients) {
            println!("  Age {:6} {}", group, count);
        }
        let view = self.status_board.view(&self.seed.appointments);
        for (status, count) in analytics::status_breakdown(&view) {
            println!("  {:12} {}", status.label(), count);
        }
        println!("\n  Trend (completed / cancelled / scheduled):");
        for trend in &self.seed.appointment_trends {
            println!(
                "  {}  {:3} {:3} {:3}",
                trend.date, trend.completed, trend.cancelled, trend.scheduled
            );
        }
    }

    fn show_revenue(&self) {
        let summary = analytics::revenue_summary(&self.seed.revenue);
        println!("\n--- Revenue ---");
        for point in &self.seed.revenue {
            println!("  {}  {:>8}  {:>4} appointments", point.month, point.revenue, point.appointments);
        }
        println!("  Total:   {}", summary.total);
        println!("  Average: {}", summary.average);
        println!("  Appointments: {}", summary.total_appointments);
        if let Some(best) = summary.best_period {
            println!("  Best month: {}", best);
        }
    }

    fn prescriptions_page(&mut self) {
        loop {
            let stats = PrescriptionStats::compute(
                &self.seed.prescriptions,
                &self.seed.prescription_templates,
                self.config.today(),
            );
            println!(
                "\n--- Prescriptions (total {}, active {}, this month {}, templates {}) ---",
                stats.total, stats.active, stats.this_month, stats.templates
            );
            let visible = self.prescription_filter.apply(&self.seed.prescriptions);
            if visible.is_empty() {
                println!("  No prescriptions found");
            }
            for rx in visible {
                println!(
                    "  [{}] {} {} - {} ({} medications, {})",
                    rx.id,
                    rx.date,
                    rx.patient_name,
                    rx.diagnosis,
                    rx.medications.len(),
                    rx.status
                );
            }

            println!("\n1. Search  2. Status filter  3. Templates  4. New prescription  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => self.prescription_filter.query = self.get_input("Search patient, diagnosis or medication", Some("")),
                2 => {
                    let status = self.get_input("Status (all/active/completed/cancelled)", Some("all"));
                    match status.parse::<PrescriptionStatusFilter>() {
                        Ok(status) => self.prescription_filter.status = status,
                        Err(e) => println!("{}", e),
                    }
                }
                3 => {
                    for template in &self.seed.prescription_templates {
                        println!(
                            "  [{}] {} ({}, used {} times)",
                            template.id, template.name, template.category, template.usage_count
                        );
                    }
                }
                4 => self.create_prescription(),
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn create_prescription(&mut self) {
        self.modal.open();
        let template_id = self.get_input("Template id (blank for none)", Some(""));
        let mut draft = match self
            .seed
            .prescription_templates
            .iter()
            .find(|t| t.id == template_id)
        {
            Some(template) => PrescriptionDraft::from_template(template),
            None => PrescriptionDraft::new(),
        };

        draft.patient_id = self.get_input("Patient id", None);
        draft.diagnosis = self.get_input("Diagnosis", None);
        if draft.medications.iter().all(|m| m.name.is_empty()) {
            let name = self.get_input("Medication name", None);
            let dosage = self.get_input("Dosage", None);
            let frequency = self.get_input("Frequency", Some("Once daily"));
            if let Some(first) = draft.medications.first_mut() {
                first.name = name;
                first.dosage = dosage;
                first.frequency = frequency;
            }
        }
        draft.doctor_notes = self.get_input("Notes", Some(""));

        let patient_name = self
            .seed
            .patient(&draft.patient_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        match draft.submit(&patient_name, self.config.today()) {
            Ok(rx) => println!("Created {} for {}", rx.id, rx.patient_name),
            Err(e) => println!("{}", e),
        }
        self.modal.close();
    }

    fn profile_page(&mut self) {
        loop {
            let doctor = self.profile.doctor();
            println!("\n--- Profile ---");
            println!("  {} ({})", doctor.name, doctor.qualification);
            println!("  {} at {}", doctor.specialty, doctor.hospital);
            println!("  {} / {}", doctor.email, doctor.phone);
            println!("  Experience {} | Rating {:.1} | Fee {}", doctor.experience, doctor.rating, doctor.consultation_fee);
            println!("  Joined {} | {} patients | {} completed", doctor.joined_date, doctor.total_patients, doctor.completed_appointments);

            println!("\n1. Edit field  2. Save  3. Cancel  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => {
                    self.profile.begin_edit();
                    let field = self.get_input("Field (name/email/phone/specialty/experience/qualification/hospital/fee)", None);
                    let value = self.get_input("Value", None);
                    let result = field
                        .parse::<ProfileField>()
                        .and_then(|field| self.profile.set_field(field, &value));
                    if let Err(e) = result {
                        println!("{}", e);
                    }
                }
                2 => match self.profile.save() {
                    Ok(doctor) => println!("Saved profile for {}", doctor.name),
                    Err(e) => println!("{}", e),
                },
                3 => self.profile.cancel(),
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn settings_page(&mut self) {
        loop {
            let settings = self.settings.settings();
            println!("\n--- Settings{} ---", if self.settings.has_changes() { " (unsaved)" } else { "" });
            println!("  Language {} | Timezone {}", settings.general.language, settings.general.timezone);
            println!("  Theme {:?} | Font {:?} | Compact {}", settings.appearance.theme, settings.appearance.font_size, settings.appearance.compact_mode);
            println!("  Two-factor {} | Session timeout {} min", settings.security.two_factor_auth, settings.security.session_timeout_minutes);
            println!("  Sound {} at {}%", settings.notifications.sound.enabled, settings.notifications.sound.volume);

            println!("\n1. Toggle two-factor  2. Toggle compact mode  3. Set volume  4. Save  5. Reset  0. Back");
            match self.get_int_input("Choice", Some(0)) {
                1 => self.settings.update(|s| s.security.two_factor_auth = !s.security.two_factor_auth),
                2 => self.settings.update(|s| s.appearance.compact_mode = !s.appearance.compact_mode),
                3 => {
                    let volume = self.get_int_input("Volume (0-100)", Some(70)).clamp(0, 100) as u8;
                    self.settings.update(|s| s.notifications.sound.volume = volume);
                }
                4 => {
                    self.settings.save();
                    println!("Settings saved");
                }
                5 => self.settings.reset_to_defaults(),
                _ => return,
            }
            if !self.running {
                return;
            }
        }
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();
            let choice = self.get_int_input("Enter choice", Some(1));

            match choice {
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                n if n >= 1 && (n as usize) <= Page::ALL.len() => {
                    self.open_page(Page::ALL[n as usize - 1]);
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn main() {
    env_logger::init();

    let config = match DashboardConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let cli = SeedData::load().and_then(|seed| DashboardCli::new(seed, config));
    match cli {
        Ok(mut cli) => cli.run(),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
