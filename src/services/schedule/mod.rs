//! Upcoming-occurrence listing.
//!
//! Expands every visible template into the concrete instances that fall in
//! a time window, each tagged with its composite occurrence id.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

use crate::models::event_template::EventTemplate;
use crate::models::occurrence::Occurrence;
use crate::services::occurrence::{occurrences_from, OccurrenceError};
use crate::services::template::TemplateLookup;

pub struct ScheduleService<'a, L: TemplateLookup + ?Sized> {
    templates: &'a L,
}

impl<'a, L: TemplateLookup + ?Sized> ScheduleService<'a, L> {
    pub fn new(templates: &'a L) -> Self {
        Self { templates }
    }

    /// Occurrences that have not ended by `now` and start before
    /// `now + window`, at most `per_template_limit` per template, sorted by
    /// start time.
    pub fn upcoming(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        per_template_limit: usize,
        viewer: Option<&str>,
    ) -> Result<Vec<Occurrence>> {
        let window_end = now
            .checked_add_signed(window)
            .context("Listing window is out of range")?;

        let templates = self
            .templates
            .visible_templates(viewer.map(str::to_string))
            .context("Failed to load templates for listing")?;

        let mut occurrences = Vec::new();
        for template in &templates {
            match occurrences_in_window(template, now, window_end, per_template_limit) {
                Ok(found) => occurrences.extend(found),
                Err(OccurrenceError::InvalidBaseId(id)) => {
                    log::warn!("Skipping template with non-UUID id '{}'", id);
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("Failed to expand template {}", template.id)
                    });
                }
            }
        }

        occurrences.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
        log::debug!(
            "Listed {} occurrences from {} templates",
            occurrences.len(),
            templates.len()
        );
        Ok(occurrences)
    }
}

/// Instances of one template that are still running or upcoming at `now`
/// and start before `window_end`.
pub fn occurrences_in_window(
    template: &EventTemplate,
    now: DateTime<Utc>,
    window_end: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<Occurrence>, OccurrenceError> {
    let duration = template.duration();
    // Searching from `now - duration` keeps a session that is in progress.
    let search_from = now
        .checked_sub_signed(duration)
        .ok_or(OccurrenceError::OccurrenceOutOfRange)?;

    occurrences_from(template.start, template.recurrence, search_from)?
        .filter(|start| *start + duration > now)
        .take_while(|start| *start < window_end)
        .take(limit)
        .map(|start| Occurrence::of(template, start))
        .collect()
}
