/// Patient directory search, gender filter and sort.

use crate::error::{DashboardError, Result};
use crate::models::{Gender, Patient};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenderFilter {
    #[default]
    All,
    Only(Gender),
}

impl GenderFilter {
    pub fn matches(&self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(wanted) => *wanted == gender,
        }
    }
}

impl FromStr for GenderFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(GenderFilter::All)
        } else {
            value.parse().map(GenderFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatientSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Oldest first.
    Age,
    /// Most recent visit first.
    LastVisit,
}

impl PatientSort {
    fn compare(&self, a: &Patient, b: &Patient) -> Ordering {
        match self {
            PatientSort::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            PatientSort::Age => b.age.cmp(&a.age),
            PatientSort::LastVisit => b.last_visit.cmp(&a.last_visit),
        }
    }
}

impl FromStr for PatientSort {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Ok(PatientSort::Name),
            "age" => Ok(PatientSort::Age),
            "lastvisit" | "last-visit" | "last_visit" => Ok(PatientSort::LastVisit),
            _ => Err(DashboardError::unknown("patient sort", value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientQuery {
    pub search: String,
    pub gender: GenderFilter,
    pub sort: PatientSort,
}

impl PatientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_gender(mut self, gender: GenderFilter) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_sort(mut self, sort: PatientSort) -> Self {
        self.sort = sort;
        self
    }

    /// Name and email match case-insensitively; the phone number is matched
    /// as typed.
    fn matches_search(&self, patient: &Patient) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        patient.name.to_lowercase().contains(&needle)
            || patient.email.to_lowercase().contains(&needle)
            || patient.phone.contains(&self.search)
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        self.matches_search(patient) && self.gender.matches(patient.gender)
    }

    /// Matching patients in sort order. `patients` is left untouched.
    pub fn apply<'a>(&self, patients: &'a [Patient]) -> Vec<&'a Patient> {
        let mut visible: Vec<&Patient> = patients.iter().filter(|p| self.matches(p)).collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }
}
