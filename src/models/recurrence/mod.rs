// Recurrence module
// Rule governing how a meditation event repeats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::occurrence::error::OccurrenceError;

/// How an event template advances from one occurrence to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceRule {
    pub const ALL: [RecurrenceRule; 4] = [
        RecurrenceRule::None,
        RecurrenceRule::Daily,
        RecurrenceRule::Weekly,
        RecurrenceRule::Monthly,
    ];

    /// Lowercase name used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceRule::None => "none",
            RecurrenceRule::Daily => "daily",
            RecurrenceRule::Weekly => "weekly",
            RecurrenceRule::Monthly => "monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceRule::None)
    }

    /// RFC 5545 `FREQ` value, `None` for one-time events.
    pub fn rrule_freq(&self) -> Option<&'static str> {
        match self {
            RecurrenceRule::None => None,
            RecurrenceRule::Daily => Some("DAILY"),
            RecurrenceRule::Weekly => Some("WEEKLY"),
            RecurrenceRule::Monthly => Some("MONTHLY"),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceRule {
    type Err = OccurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RecurrenceRule::None),
            "daily" => Ok(RecurrenceRule::Daily),
            "weekly" => Ok(RecurrenceRule::Weekly),
            "monthly" => Ok(RecurrenceRule::Monthly),
            _ => Err(OccurrenceError::UnknownRecurrenceRule(s.to_string())),
        }
    }
}
