/// Data models for the practice dashboard.
///
/// This module defines the records every page reads from:
/// - Doctor: the signed-in practitioner
/// - Patient: demographic and medical summary
/// - Appointment: a booked visit with status and payment axes
/// - Prescription / Medication: patient-scoped medication orders
/// - Notification, RevenuePoint, AppointmentTrend, DashboardStats: header and chart data
///
/// Enum values parse from and print as the kebab-case strings the dashboard
/// uses in its filters (`"in-progress"`, `"routine-checkup"`, ...).

use crate::error::{DashboardError, Result};
use crate::layout::Page;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares `FromStr`, `Display` and `as_str` for a fieldless enum.
macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = DashboardError;

            fn from_str(value: &str) -> Result<Self> {
                match value.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(DashboardError::unknown($kind, value)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoctorStatus {
    Active,
    Busy,
    Offline,
}

string_enum!(DoctorStatus, "doctor status", {
    Active => "active",
    Busy => "busy",
    Offline => "offline",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

string_enum!(Gender, "gender", {
    Male => "male",
    Female => "female",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

string_enum!(AppointmentStatus, "appointment status", {
    Scheduled => "scheduled",
    InProgress => "in-progress",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no-show",
});

impl AppointmentStatus {
    /// Human label used in list rows ("In Progress", "No Show").
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No Show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Emergency,
    RoutineCheckup,
}

string_enum!(AppointmentType, "appointment type", {
    Consultation => "consultation",
    FollowUp => "follow-up",
    Emergency => "emergency",
    RoutineCheckup => "routine-checkup",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

string_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Paid => "paid",
    Refunded => "refunded",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrescriptionStatus {
    Active,
    Completed,
    Cancelled,
}

string_enum!(PrescriptionStatus, "prescription status", {
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    Appointment,
    Payment,
    System,
    Reminder,
}

string_enum!(NotificationType, "notification type", {
    Appointment => "appointment",
    Payment => "payment",
    System => "system",
    Reminder => "reminder",
});

/// The practitioner whose dashboard this is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub experience: String,
    pub qualification: String,
    pub hospital: String,
    pub rating: f32,
    pub consultation_fee: u32,
    pub total_patients: u32,
    pub completed_appointments: u32,
    pub joined_date: NaiveDate,
    pub status: DoctorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
    pub gender: Gender,
    pub blood_type: String,
    pub address: String,
    pub emergency_contact: String,
    pub medical_history: Vec<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
    pub last_visit: NaiveDate,
    pub total_visits: u32,
}

/// A booked visit.
///
/// `status` and `payment_status` are independent: a cancelled visit may
/// still be marked paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient: Patient,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub reason: String,
    pub notes: Option<String>,
    pub diagnosis: Option<String>,
    pub fee: u32,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn patient_id(&self) -> &str {
        &self.patient.id
    }

    /// Start time in the 12-hour form shown on the list ("09:00 AM").
    pub fn time_label(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub medications: Vec<Medication>,
    pub diagnosis: String,
    pub next_visit: Option<NaiveDate>,
    pub status: PrescriptionStatus,
    pub doctor_notes: String,
}

/// Reusable medication set offered when writing a new prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionTemplate {
    pub id: String,
    pub name: String,
    pub category: String,
    pub usage_count: u32,
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Page the notification links to.
    pub action_url: Option<Page>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: u64,
    pub appointments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentTrend {
    pub date: NaiveDate,
    pub completed: u32,
    pub cancelled: u32,
    pub scheduled: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueTotals {
    pub today: u64,
    pub this_month: u64,
    pub this_year: u64,
}

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: u32,
    pub today_appointments: u32,
    pub completed_today: u32,
    pub revenue: RevenueTotals,
    pub upcoming_appointments: u32,
    pub patient_satisfaction: f32,
    pub average_wait_minutes: u32,
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidDate(value.to_string()))
}

/// Parse an `HH:MM` (24h) or `HH:MM AM` (12h) time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%I:%M %p"))
        .map_err(|_| DashboardError::InvalidTime(value.to_string()))
}
