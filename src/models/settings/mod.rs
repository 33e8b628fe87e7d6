// Settings module
// User configuration, loaded from a TOML file

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest look-ahead for the upcoming listing.
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file; the platform data directory is used when unset.
    pub database_path: Option<PathBuf>,
    /// IANA zone used when printing times.
    pub display_timezone: String,
    pub upcoming_window_days: i64,
    pub occurrences_per_template: usize,
    pub preparation_seconds: i64,
    pub default_duration_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            display_timezone: "UTC".to_string(),
            upcoming_window_days: 14,
            occurrences_per_template: 5,
            preparation_seconds: 10,
            default_duration_minutes: 20,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        self.timezone()?;

        if !(1..=MAX_WINDOW_DAYS).contains(&self.upcoming_window_days) {
            return Err("Upcoming window must be between 1 and 365 days".to_string());
        }

        if !(1..=100).contains(&self.occurrences_per_template) {
            return Err("Occurrences per template must be between 1 and 100".to_string());
        }

        if !(0..=600).contains(&self.preparation_seconds) {
            return Err("Preparation must be between 0 and 600 seconds".to_string());
        }

        if !(1..=24 * 60).contains(&self.default_duration_minutes) {
            return Err("Default duration must be between 1 and 1440 minutes".to_string());
        }

        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, String> {
        Tz::from_str(&self.display_timezone)
            .map_err(|_| format!("Unknown timezone '{}'", self.display_timezone))
    }
}
