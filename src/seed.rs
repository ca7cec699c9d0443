/// Static seed data for the dashboard.
///
/// The records are compiled into the binary from `data/seed.json` and parsed
/// once at start-up. Pages only ever borrow from `SeedData`; local edits live
/// in page state and are lost on exit.

use crate::error::{DashboardError, Result};
use crate::models::{
    Appointment, AppointmentStatus, AppointmentTrend, AppointmentType, DashboardStats, Doctor,
    Notification, Patient, PaymentStatus, Prescription, PrescriptionTemplate, RevenuePoint,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::debug;
use serde::Deserialize;

const SEED_JSON: &str = include_str!("data/seed.json");

/// Appointment as stored in the seed file: the patient is referenced by id
/// and embedded by value when the seed is loaded.
#[derive(Debug, Deserialize)]
struct SeedAppointment {
    id: String,
    patient_id: String,
    doctor_id: String,
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
    status: AppointmentStatus,
    #[serde(rename = "type")]
    kind: AppointmentType,
    reason: String,
    notes: Option<String>,
    diagnosis: Option<String>,
    fee: u32,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    doctor: Doctor,
    patients: Vec<Patient>,
    appointments: Vec<SeedAppointment>,
    prescriptions: Vec<Prescription>,
    prescription_templates: Vec<PrescriptionTemplate>,
    stats: DashboardStats,
    revenue: Vec<RevenuePoint>,
    appointment_trends: Vec<AppointmentTrend>,
    notifications: Vec<Notification>,
}

/// Every collection the dashboard pages read from.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub doctor: Doctor,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,
    pub prescription_templates: Vec<PrescriptionTemplate>,
    pub stats: DashboardStats,
    pub revenue: Vec<RevenuePoint>,
    pub appointment_trends: Vec<AppointmentTrend>,
    pub notifications: Vec<Notification>,
}

impl SeedData {
    /// Load the built-in seed.
    pub fn load() -> Result<Self> {
        Self::from_json(SEED_JSON)
    }

    /// Parse a seed document and embed each appointment's patient.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SeedFile = serde_json::from_str(json)?;

        let appointments = file
            .appointments
            .into_iter()
            .map(|raw| -> Result<Appointment> {
                let patient = file
                    .patients
                    .iter()
                    .find(|p| p.id == raw.patient_id)
                    .cloned()
                    .ok_or_else(|| DashboardError::NotFound {
                        kind: "patient",
                        id: raw.patient_id.clone(),
                    })?;

                Ok(Appointment {
                    id: raw.id,
                    patient,
                    doctor_id: raw.doctor_id,
                    date: raw.date,
                    time: raw.time,
                    duration_minutes: raw.duration_minutes,
                    status: raw.status,
                    kind: raw.kind,
                    reason: raw.reason,
                    notes: raw.notes,
                    diagnosis: raw.diagnosis,
                    fee: raw.fee,
                    payment_status: raw.payment_status,
                    created_at: raw.created_at,
                    updated_at: raw.updated_at,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Loaded seed: {} patients, {} appointments, {} prescriptions",
            file.patients.len(),
            appointments.len(),
            file.prescriptions.len()
        );

        Ok(SeedData {
            doctor: file.doctor,
            patients: file.patients,
            appointments,
            prescriptions: file.prescriptions,
            prescription_templates: file.prescription_templates,
            stats: file.stats,
            revenue: file.revenue,
            appointment_trends: file.appointment_trends,
            notifications: file.notifications,
        })
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn prescription(&self, id: &str) -> Option<&Prescription> {
        self.prescriptions.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Page;

    #[test]
    fn builtin_seed_loads() {
        let seed = SeedData::load().unwrap();
        assert_eq!(seed.doctor.name, "Dr. Sarah Johnson");
        assert_eq!(seed.patients.len(), 5);
        assert_eq!(seed.appointments.len(), 6);
        assert_eq!(seed.prescriptions.len(), 3);
        assert_eq!(seed.prescription_templates.len(), 3);
        assert_eq!(seed.revenue.len(), 12);
        assert_eq!(seed.notifications.len(), 4);
    }

    #[test]
    fn appointments_embed_their_patient() {
        let seed = SeedData::load().unwrap();
        let follow_up = seed.appointment("app-006").unwrap();
        assert_eq!(follow_up.patient.name, "John Doe");
        assert_eq!(follow_up.patient_id(), "pat-001");
        assert_eq!(follow_up.time_label(), "09:00 AM");
    }

    #[test]
    fn optional_clinical_fields_default_to_none() {
        let seed = SeedData::load().unwrap();
        assert!(seed.appointment("app-001").unwrap().diagnosis.is_none());
        assert_eq!(
            seed.appointment("app-005").unwrap().diagnosis.as_deref(),
            Some("Minor viral infection")
        );
    }

    #[test]
    fn dangling_patient_reference_is_reported() {
        let json = SEED_JSON.replacen("\"patient_id\": \"pat-005\",\n      \"doctor_id\"", "\"patient_id\": \"pat-999\",\n      \"doctor_id\"", 1);
        let err = SeedData::from_json(&json).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { kind: "patient", .. }));
    }

    #[test]
    fn notification_links_resolve_to_pages() {
        let seed = SeedData::load().unwrap();
        let links: Vec<Option<Page>> = seed.notifications.iter().map(|n| n.action_url).collect();
        assert_eq!(links, vec![Some(Page::Appointments), None, Some(Page::Schedule), None]);

        let json = SEED_JSON.replacen("\"action_url\": \"/schedule\"", "\"action_url\": \"/billing\"", 1);
        assert!(matches!(SeedData::from_json(&json), Err(DashboardError::Json(_))));
    }
}
