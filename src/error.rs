/// Error type shared by every dashboard page.
///
/// Nothing here is fatal: the front end prints the message and goes back to
/// the menu. "No results" is never an error, it is an empty `Vec`.

use crate::models::AppointmentStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time: '{0}'. Expected HH:MM")]
    InvalidTime(String),

    /// A string that does not name any variant of an enum.
    #[error("Invalid {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Unknown page: '{0}'")]
    UnknownPage(String),

    #[error("Profile is not in edit mode")]
    NotEditing,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        DashboardError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
