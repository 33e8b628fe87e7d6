//! Resolution of a composite occurrence id into a concrete, joinable instance.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::event_template::EventTemplate;
use crate::models::occurrence::{Occurrence, OccurrenceStatus};
use crate::services::occurrence::{decode_occurrence_id, next_occurrence, OccurrenceError};
use crate::services::template::TemplateLookup;

/// A template together with the instance a detail view should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOccurrence {
    pub template: EventTemplate,
    pub occurrence: Occurrence,
    pub status: OccurrenceStatus,
    /// True when the requested instance had passed and a later one was substituted.
    pub rescheduled: bool,
}

pub struct OccurrenceResolver<'a, L: TemplateLookup + ?Sized> {
    templates: &'a L,
}

impl<'a, L: TemplateLookup + ?Sized> OccurrenceResolver<'a, L> {
    pub fn new(templates: &'a L) -> Self {
        Self { templates }
    }

    /// Resolve `composite_id` as seen at `now`.
    ///
    /// Returns `Ok(None)` for "event not found": an unknown template or an
    /// id whose timestamp part cannot be parsed.
    pub fn resolve(
        &self,
        composite_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResolvedOccurrence>> {
        let reference = match decode_occurrence_id(composite_id) {
            Ok(reference) => reference,
            Err(err @ OccurrenceError::MalformedOccurrenceId { .. }) => {
                log::warn!("{}", err);
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let Some(template) = self
            .templates
            .find_template(&reference.base_id)
            .with_context(|| format!("Failed to look up template {}", reference.base_id))?
        else {
            log::debug!("No template for occurrence id {}", composite_id);
            return Ok(None);
        };

        let requested = reference.occurrence_time.unwrap_or(template.start);
        let start = if template.is_recurring() && requested <= now {
            next_occurrence(requested, template.recurrence, now)?
        } else {
            requested
        };

        let occurrence = Occurrence::of(&template, start)?;
        let status = occurrence.status_at(now);

        Ok(Some(ResolvedOccurrence {
            rescheduled: start != requested,
            status,
            occurrence,
            template,
        }))
    }
}
