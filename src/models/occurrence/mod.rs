// Occurrence module
// Computed instances of event templates; never stored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event_template::EventTemplate;
use crate::services::occurrence::{decode_occurrence_id, encode_occurrence_id, OccurrenceResult};

/// "Template X at instant T", the decoded form of a composite occurrence id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceRef {
    pub base_id: String,
    /// `None` when the id named the template without a specific instance.
    pub occurrence_time: Option<DateTime<Utc>>,
}

impl OccurrenceRef {
    pub fn parse(composite_id: &str) -> OccurrenceResult<Self> {
        decode_occurrence_id(composite_id)
    }

    /// Composite id for this reference; a bare base id when no time is set.
    pub fn to_composite_id(&self) -> OccurrenceResult<String> {
        match self.occurrence_time {
            Some(time) => encode_occurrence_id(&self.base_id, time),
            None => Ok(self.base_id.clone()),
        }
    }
}

/// One displayable instance of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub composite_id: String,
    pub template_id: String,
    pub title: String,
    pub tradition: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Occurrence {
    /// Instance of `template` starting at `start`.
    pub fn of(template: &EventTemplate, start: DateTime<Utc>) -> OccurrenceResult<Self> {
        Ok(Self {
            composite_id: encode_occurrence_id(&template.id, start)?,
            template_id: template.id.clone(),
            title: template.title.clone(),
            tradition: template.tradition.clone(),
            start,
            end: start + template.duration(),
        })
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> OccurrenceStatus {
        if self.start > now {
            OccurrenceStatus::Upcoming
        } else if self.end > now {
            OccurrenceStatus::InProgress
        } else {
            OccurrenceStatus::Ended
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    Upcoming,
    InProgress,
    Ended,
}
