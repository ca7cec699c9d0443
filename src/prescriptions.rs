/// Prescription list filter, headline stats and the "new prescription" form.

use crate::error::{DashboardError, Result};
use crate::models::{Medication, Prescription, PrescriptionStatus, PrescriptionTemplate};
use chrono::{Datelike, NaiveDate};
use log::info;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrescriptionStatusFilter {
    #[default]
    All,
    Only(PrescriptionStatus),
}

impl FromStr for PrescriptionStatusFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(PrescriptionStatusFilter::All)
        } else {
            value.parse().map(PrescriptionStatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionFilter {
    pub query: String,
    pub status: PrescriptionStatusFilter,
}

impl PrescriptionFilter {
    pub fn new(query: &str, status: PrescriptionStatusFilter) -> Self {
        PrescriptionFilter {
            query: query.to_string(),
            status,
        }
    }

    /// Query matches patient name, diagnosis or any medication name.
    pub fn matches(&self, prescription: &Prescription) -> bool {
        let status_ok = match self.status {
            PrescriptionStatusFilter::All => true,
            PrescriptionStatusFilter::Only(wanted) => prescription.status == wanted,
        };
        if !status_ok {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        prescription.patient_name.to_lowercase().contains(&needle)
            || prescription.diagnosis.to_lowercase().contains(&needle)
            || prescription
                .medications
                .iter()
                .any(|m| m.name.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, prescriptions: &'a [Prescription]) -> Vec<&'a Prescription> {
        prescriptions.iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionStats {
    pub total: usize,
    pub active: usize,
    pub this_month: usize,
    pub templates: usize,
}

impl PrescriptionStats {
    /// `this_month` counts prescriptions dated in the same month and year as `today`.
    pub fn compute(
        prescriptions: &[Prescription],
        templates: &[PrescriptionTemplate],
        today: NaiveDate,
    ) -> Self {
        PrescriptionStats {
            total: prescriptions.len(),
            active: prescriptions
                .iter()
                .filter(|p| p.status == PrescriptionStatus::Active)
                .count(),
            this_month: prescriptions
                .iter()
                .filter(|p| p.date.year() == today.year() && p.date.month() == today.month())
                .count(),
            templates: templates.len(),
        }
    }
}

/// Editable field of a medication row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationField {
    Name,
    Dosage,
    Frequency,
    Duration,
    Instructions,
}

impl FromStr for MedicationField {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Ok(MedicationField::Name),
            "dosage" => Ok(MedicationField::Dosage),
            "frequency" => Ok(MedicationField::Frequency),
            "duration" => Ok(MedicationField::Duration),
            "instructions" => Ok(MedicationField::Instructions),
            _ => Err(DashboardError::unknown("medication field", value)),
        }
    }
}

/// The "Create Prescription" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub patient_id: String,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub doctor_notes: String,
    pub next_visit: Option<NaiveDate>,
}

impl Default for PrescriptionDraft {
    fn default() -> Self {
        PrescriptionDraft {
            patient_id: String::new(),
            diagnosis: String::new(),
            medications: vec![Medication::default()],
            doctor_notes: String::new(),
            next_visit: None,
        }
    }
}

impl PrescriptionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft pre-filled with a template's medications.
    pub fn from_template(template: &PrescriptionTemplate) -> Self {
        PrescriptionDraft {
            medications: template.medications.clone(),
            ..Self::default()
        }
    }

    pub fn add_medication(&mut self) {
        self.medications.push(Medication::default());
    }

    /// Remove a medication row. The form always keeps at least one row.
    pub fn remove_medication(&mut self, index: usize) -> bool {
        if self.medications.len() <= 1 || index >= self.medications.len() {
            return false;
        }
        self.medications.remove(index);
        true
    }

    pub fn update_medication(&mut self, index: usize, field: MedicationField, value: &str) -> Result<()> {
        let medication = self.medications.get_mut(index).ok_or_else(|| DashboardError::NotFound {
            kind: "medication row",
            id: index.to_string(),
        })?;
        let target = match field {
            MedicationField::Name => &mut medication.name,
            MedicationField::Dosage => &mut medication.dosage,
            MedicationField::Frequency => &mut medication.frequency,
            MedicationField::Duration => &mut medication.duration,
            MedicationField::Instructions => &mut medication.instructions,
        };
        *target = value.to_string();
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.patient_id.trim().is_empty() {
            return Err(DashboardError::Validation("Patient is required".to_string()));
        }
        if self.diagnosis.trim().is_empty() {
            return Err(DashboardError::Validation("Diagnosis is required".to_string()));
        }
        for (i, medication) in self.medications.iter().enumerate() {
            if medication.name.trim().is_empty() || medication.dosage.trim().is_empty() {
                return Err(DashboardError::Validation(format!(
                    "Medication {} needs a name and dosage",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Validate and build the prescription. Nothing is stored.
    pub fn submit(&self, patient_name: &str, date: NaiveDate) -> Result<Prescription> {
        self.validate()?;
        let prescription = Prescription {
            id: format!("rx-{}", Uuid::new_v4()),
            patient_id: self.patient_id.clone(),
            patient_name: patient_name.to_string(),
            date,
            medications: self.medications.clone(),
            diagnosis: self.diagnosis.clone(),
            next_visit: self.next_visit,
            status: PrescriptionStatus::Active,
            doctor_notes: self.doctor_notes.clone(),
        };
        info!(
            "Creating prescription {} for {} with {} medication(s)",
            prescription.id,
            patient_name,
            prescription.medications.len()
        );
        Ok(prescription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn ids(visible: &[&Prescription]) -> Vec<String> {
        visible.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn query_matches_medication_names() {
        let seed = SeedData::load().unwrap();
        let filter = PrescriptionFilter::new("aspirin", PrescriptionStatusFilter::All);
        assert_eq!(ids(&filter.apply(&seed.prescriptions)), vec!["rx-003"]);

        let by_diagnosis = PrescriptionFilter::new("MIGRAINE", PrescriptionStatusFilter::All);
        assert_eq!(ids(&by_diagnosis.apply(&seed.prescriptions)), vec!["rx-002"]);
    }

    #[test]
    fn status_filter_excludes_others() {
        let seed = SeedData::load().unwrap();
        let completed = PrescriptionFilter::new("", PrescriptionStatusFilter::Only(PrescriptionStatus::Completed));
        assert!(completed.apply(&seed.prescriptions).is_empty());
        let active = PrescriptionFilter::new("", "active".parse().unwrap());
        assert_eq!(active.apply(&seed.prescriptions).len(), 3);
    }

    #[test]
    fn stats_count_current_month() {
        let seed = SeedData::load().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let stats = PrescriptionStats::compute(&seed.prescriptions, &seed.prescription_templates, today);
        assert_eq!(
            stats,
            PrescriptionStats { total: 3, active: 3, this_month: 3, templates: 3 }
        );

        let later = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
        let stats = PrescriptionStats::compute(&seed.prescriptions, &seed.prescription_templates, later);
        assert_eq!(stats.this_month, 0);
    }

    #[test]
    fn draft_keeps_at_least_one_medication() {
        let mut draft = PrescriptionDraft::new();
        assert_eq!(draft.medications.len(), 1);
        assert!(!draft.remove_medication(0));

        draft.add_medication();
        assert!(draft.remove_medication(1));
        assert!(!draft.remove_medication(5));
    }

    #[test]
    fn draft_validation_and_submit() {
        let mut draft = PrescriptionDraft::new();
        assert!(matches!(draft.validate(), Err(DashboardError::Validation(_))));

        draft.patient_id = "pat-004".to_string();
        draft.diagnosis = "Asthma flare".to_string();
        assert!(draft.validate().is_err());

        draft.update_medication(0, MedicationField::Name, "Albuterol").unwrap();
        draft.update_medication(0, "dosage".parse().unwrap(), "90mcg").unwrap();
        assert!(draft.update_medication(3, MedicationField::Name, "x").is_err());

        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let prescription = draft.submit("Lisa Wang", date).unwrap();
        assert!(prescription.id.starts_with("rx-"));
        assert_eq!(prescription.status, PrescriptionStatus::Active);
        assert_eq!(prescription.medications[0].dosage, "90mcg");
    }

    #[test]
    fn template_prefills_medications() {
        let seed = SeedData::load().unwrap();
        let draft = PrescriptionDraft::from_template(&seed.prescription_templates[1]);
        let names: Vec<&str> = draft.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Metformin", "Glipizide"]);
        assert!(draft.patient_id.is_empty());
    }
}
