//! Medical practice dashboard over in-memory seed data.
//!
//! Each page of the dashboard is a module holding its own view state
//! (filters, selections, local edits) over the immutable [`seed::SeedData`].
//! Nothing is persisted.

pub mod analytics;
pub mod appointments;
pub mod calendar;
pub mod config;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod models;
pub mod patients;
pub mod prescriptions;
pub mod profile;
pub mod schedule;
pub mod seed;
pub mod settings;

pub use error::{DashboardError, Result};
