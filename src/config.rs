/// Runtime configuration for the dashboard front end.
///
/// Read from a JSON file named by the first command-line argument or by the
/// `CLINIC_DASHBOARD_CONFIG` environment variable. Missing keys take their
/// defaults, so an empty object is a valid configuration.

use crate::appointments::ViewMode;
use crate::calendar::WeekStart;
use crate::error::{DashboardError, Result};
use crate::models::parse_time;
use crate::schedule::RetentionMode;
use chrono::{Local, NaiveDate, NaiveTime};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "CLINIC_DASHBOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Fixed "today", for demos against the seed dates. `None` uses the local date.
    pub today: Option<NaiveDate>,
    pub week_start: WeekStart,
    pub schedule_retention: RetentionMode,
    /// Range given to a slot created with "Add slot", as HH:MM.
    pub new_slot_start: String,
    pub new_slot_end: String,
    pub default_view: ViewMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            today: None,
            week_start: WeekStart::Sunday,
            schedule_retention: RetentionMode::Reset,
            new_slot_start: "09:00".to_string(),
            new_slot_end: "10:00".to_string(),
            default_view: ViewMode::Day,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a configuration file, or return defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                let config: DashboardConfig = serde_json::from_str(&text)
                    .map_err(|e| DashboardError::Config(format!("{}: {}", path.display(), e)))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => DashboardConfig::default(),
        };
        config.new_slot_range()?;
        Ok(config)
    }

    /// Resolve the config path from `args` (program name excluded) or the
    /// environment, then load it.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let path = args
            .into_iter()
            .next()
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok());
        Self::load(path.as_deref().map(Path::new))
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Start and end of a freshly added schedule slot.
    pub fn new_slot_range(&self) -> Result<(NaiveTime, NaiveTime)> {
        let start = parse_time(&self.new_slot_start)
            .map_err(|e| DashboardError::Config(format!("new_slot_start: {}", e)))?;
        let end = parse_time(&self.new_slot_end)
            .map_err(|e| DashboardError::Config(format!("new_slot_end: {}", e)))?;
        if end <= start {
            return Err(DashboardError::Config(
                "new_slot_end must be after new_slot_start".to_string(),
            ));
        }
        Ok((start, end))
    }
}
