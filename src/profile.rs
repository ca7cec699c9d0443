/// Profile page: edit a local copy of the current doctor.

use crate::error::{DashboardError, Result};
use crate::models::Doctor;
use log::info;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Specialty,
    Experience,
    Qualification,
    Hospital,
    ConsultationFee,
}

impl FromStr for ProfileField {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Ok(ProfileField::Name),
            "email" => Ok(ProfileField::Email),
            "phone" => Ok(ProfileField::Phone),
            "specialty" => Ok(ProfileField::Specialty),
            "experience" => Ok(ProfileField::Experience),
            "qualification" => Ok(ProfileField::Qualification),
            "hospital" => Ok(ProfileField::Hospital),
            "fee" | "consultation-fee" => Ok(ProfileField::ConsultationFee),
            _ => Err(DashboardError::unknown("profile field", value)),
        }
    }
}

pub struct ProfileEditor {
    doctor: Doctor,
    draft: Option<Doctor>,
}

impl ProfileEditor {
    pub fn new(doctor: &Doctor) -> Self {
        ProfileEditor {
            doctor: doctor.clone(),
            draft: None,
        }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.doctor.clone());
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<()> {
        let draft = self.draft.as_mut().ok_or(DashboardError::NotEditing)?;
        let value = value.trim();
        match field {
            ProfileField::Name => draft.name = value.to_string(),
            ProfileField::Email => {
                if !value.contains('@') {
                    return Err(DashboardError::Validation(format!("'{}' is not an email address", value)));
                }
                draft.email = value.to_string();
            }
            ProfileField::Phone => draft.phone = value.to_string(),
            ProfileField::Specialty => draft.specialty = value.to_string(),
            ProfileField::Experience => draft.experience = value.to_string(),
            ProfileField::Qualification => draft.qualification = value.to_string(),
            ProfileField::Hospital => draft.hospital = value.to_string(),
            ProfileField::ConsultationFee => {
                draft.consultation_fee = value
                    .parse()
                    .map_err(|_| DashboardError::Validation(format!("'{}' is not a fee", value)))?;
            }
        }
        Ok(())
    }

    /// Commit the draft into the page-local doctor.
    pub fn save(&mut self) -> Result<&Doctor> {
        let draft = self.draft.take().ok_or(DashboardError::NotEditing)?;
        if draft.name.is_empty() {
            self.draft = Some(draft);
            return Err(DashboardError::Validation("Name cannot be empty".to_string()));
        }
        info!("Saving profile data for {}", draft.name);
        self.doctor = draft;
        Ok(&self.doctor)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
