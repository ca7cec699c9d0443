/// Derived numbers for the Dashboard, Analytics and Revenue pages.

use crate::models::{
    Appointment, AppointmentStatus, DashboardStats, Gender, Notification, Patient, RevenuePoint,
};
use chrono::NaiveDate;

pub fn todays_appointments(appointments: &[Appointment], today: NaiveDate) -> Vec<&Appointment> {
    appointments.iter().filter(|a| a.date == today).collect()
}

/// Completed-today as a rounded percentage of today's appointments.
pub fn completion_rate(stats: &DashboardStats) -> u32 {
    if stats.today_appointments == 0 {
        return 0;
    }
    (stats.completed_today as f64 / stats.today_appointments as f64 * 100.0).round() as u32
}

pub fn unread_notifications(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

pub fn demographics(patients: &[Patient]) -> Demographics {
    patients.iter().fold(Demographics::default(), |mut acc, p| {
        match p.gender {
            Gender::Male => acc.male += 1,
            Gender::Female => acc.female += 1,
            Gender::Other => acc.other += 1,
        }
        acc
    })
}

pub const AGE_GROUPS: [&str; 5] = ["0-18", "19-35", "36-50", "51-65", "65+"];

/// Patient counts per entry of `AGE_GROUPS`. Bounds are inclusive.
pub fn age_groups(patients: &[Patient]) -> [(&'static str, usize); 5] {
    let mut counts = [0usize; 5];
    for patient in patients {
        let bucket = match patient.age {
            0..=18 => 0,
            19..=35 => 1,
            36..=50 => 2,
            51..=65 => 3,
            _ => 4,
        };
        counts[bucket] += 1;
    }
    std::array::from_fn(|i| (AGE_GROUPS[i], counts[i]))
}

/// Count of appointments per status, in `AppointmentStatus::ALL` order.
pub fn status_breakdown(appointments: &[Appointment]) -> Vec<(AppointmentStatus, usize)> {
    AppointmentStatus::ALL
        .iter()
        .map(|status| {
            (
                *status,
                appointments.iter().filter(|a| a.status == *status).count(),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueSummary {
    pub total: u64,
    pub average: u64,
    pub total_appointments: u32,
    pub best_period: Option<String>,
}

pub fn revenue_summary(points: &[RevenuePoint]) -> RevenueSummary {
    let total: u64 = points.iter().map(|p| p.revenue).sum();
    let average = if points.is_empty() {
        0
    } else {
        (total as f64 / points.len() as f64).round() as u64
    };
    RevenueSummary {
        total,
        average,
        total_appointments: points.iter().map(|p| p.appointments).sum(),
        best_period: points
            .iter()
            .max_by_key(|p| p.revenue)
            .map(|p| p.month.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn dashboard_numbers_from_seed() {
        let seed = SeedData::load().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(todays_appointments(&seed.appointments, today).len(), 4);
        assert_eq!(completion_rate(&seed.stats), 38);
        assert_eq!(unread_notifications(&seed.notifications), 2);
    }

    #[test]
    fn completion_rate_with_no_appointments() {
        let mut stats = SeedData::load().unwrap().stats;
        stats.today_appointments = 0;
        assert_eq!(completion_rate(&stats), 0);
    }

    #[test]
    fn patient_breakdowns() {
        let seed = SeedData::load().unwrap();
        assert_eq!(
            demographics(&seed.patients),
            Demographics { male: 3, female: 2, other: 0 }
        );
        assert_eq!(
            age_groups(&seed.patients),
            [("0-18", 0), ("19-35", 4), ("36-50", 1), ("51-65", 0), ("65+", 0)]
        );
    }

    #[test]
    fn age_group_edges_are_inclusive() {
        let template = SeedData::load().unwrap().patients[0].clone();
        let patients: Vec<Patient> = [18, 19, 35, 36, 50, 51, 65, 66]
            .into_iter()
            .map(|age| Patient { age, ..template.clone() })
            .collect();
        assert_eq!(
            age_groups(&patients),
            [("0-18", 1), ("19-35", 2), ("36-50", 2), ("51-65", 2), ("65+", 1)]
        );
    }

    #[test]
    fn status_breakdown_covers_every_status() {
        let seed = SeedData::load().unwrap();
        let breakdown = status_breakdown(&seed.appointments);
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0], (AppointmentStatus::Scheduled, 4));
        assert_eq!(breakdown[1], (AppointmentStatus::InProgress, 1));
        assert_eq!(breakdown[2], (AppointmentStatus::Completed, 1));
    }

    #[test]
    fn revenue_totals() {
        let seed = SeedData::load().unwrap();
        let summary = revenue_summary(&seed.revenue);
        assert_eq!(summary.total, 1_373_000);
        assert_eq!(summary.average, 114_417);
        assert_eq!(summary.total_appointments, 1915);
        assert_eq!(summary.best_period.as_deref(), Some("Nov"));

        let empty = revenue_summary(&[]);
        assert_eq!(empty.average, 0);
        assert!(empty.best_period.is_none());
    }
}
