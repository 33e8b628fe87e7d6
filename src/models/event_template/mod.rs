// Event Template model
// Stored definition of a meditation session, one-time or recurring

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::recurrence::RecurrenceRule;

/// Longest session a template may describe.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Whether a template is listed for everyone or only for its creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Global,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Global => "global",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Visibility::Global),
            "private" => Ok(Visibility::Private),
            other => Err(format!("Unknown visibility '{}'", other)),
        }
    }
}

/// Meditation event template.
///
/// Occurrences are never stored; they are computed from `start` and
/// `recurrence` on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    /// Hyphenated UUID. Empty until the template is persisted.
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// One reference occurrence of the template.
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
    pub recurrence: RecurrenceRule,
    pub tradition: Option<String>,
    pub visibility: Visibility,
    /// `None` for system-generated templates.
    pub creator_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl EventTemplate {
    /// Create a one-time global template with required fields
    ///
    /// # Examples
    /// ```
    /// use meditation_calendar::models::event_template::EventTemplate;
    /// use chrono::Utc;
    ///
    /// let template = EventTemplate::new("Morning Sit", Utc::now(), 20).unwrap();
    /// assert!(!template.is_recurring());
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Self, String> {
        let template = Self {
            id: String::new(),
            title: title.into(),
            description: None,
            start,
            duration_minutes,
            recurrence: RecurrenceRule::None,
            tradition: None,
            visibility: Visibility::Global,
            creator_id: None,
            created_at: None,
        };
        template.validate()?;
        Ok(template)
    }

    pub fn builder() -> EventTemplateBuilder {
        EventTemplateBuilder::new()
    }

    /// Validate the template. An empty id is accepted so unsaved
    /// templates can be checked before an id is assigned.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if !self.id.is_empty() && !is_hyphenated_uuid(&self.id) {
            return Err(format!("Template id '{}' is not a UUID", self.id));
        }

        if self.duration_minutes < 1 {
            return Err("Duration must be at least 1 minute".to_string());
        }

        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err("Duration cannot exceed 24 hours".to_string());
        }

        if self.visibility == Visibility::Private && self.creator_id.is_none() {
            return Err("Private events need a creator".to_string());
        }

        Ok(())
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// Global templates are visible to everyone; private ones only to their creator.
    pub fn is_visible_to(&self, viewer: Option<&str>) -> bool {
        match self.visibility {
            Visibility::Global => true,
            Visibility::Private => viewer.is_some() && self.creator_id.as_deref() == viewer,
        }
    }
}

pub(crate) fn is_hyphenated_uuid(value: &str) -> bool {
    value.split('-').count() == 5 && Uuid::try_parse(value).is_ok()
}

/// Builder for creating templates with optional fields
pub struct EventTemplateBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Utc>>,
    duration_minutes: i64,
    recurrence: RecurrenceRule,
    tradition: Option<String>,
    visibility: Visibility,
    creator_id: Option<String>,
}

impl EventTemplateBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            start: None,
            duration_minutes: 20,
            recurrence: RecurrenceRule::None,
            tradition: None,
            visibility: Visibility::Global,
            creator_id: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = rule;
        self
    }

    pub fn tradition(mut self, tradition: impl Into<String>) -> Self {
        self.tradition = Some(tradition.into());
        self
    }

    pub fn private(mut self, creator_id: impl Into<String>) -> Self {
        self.visibility = Visibility::Private;
        self.creator_id = Some(creator_id.into());
        self
    }

    pub fn creator(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = Some(creator_id.into());
        self
    }

    pub fn build(self) -> Result<EventTemplate, String> {
        let title = self.title.ok_or("Title is required")?;
        let start = self.start.ok_or("Start time is required")?;

        let template = EventTemplate {
            id: self.id.unwrap_or_default(),
            title,
            description: self.description,
            start,
            duration_minutes: self.duration_minutes,
            recurrence: self.recurrence,
            tradition: self.tradition,
            visibility: self.visibility,
            creator_id: self.creator_id,
            created_at: None,
        };

        template.validate()?;
        Ok(template)
    }
}

impl Default for EventTemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
