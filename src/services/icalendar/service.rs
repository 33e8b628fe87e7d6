use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::export;
use crate::models::event_template::EventTemplate;
use crate::services::detail::ResolvedOccurrence;

/// Service for exporting meditation events as iCalendar (.ics) text
#[derive(Debug, Default)]
pub struct ICalendarService;

impl ICalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Export a template as a series, with an RRULE when it repeats
    pub fn export_template(&self, template: &EventTemplate) -> String {
        export::template(template)
    }

    /// Export the single instance a detail view resolved to
    pub fn export_occurrence(&self, resolved: &ResolvedOccurrence) -> String {
        export::occurrence(&resolved.template, &resolved.occurrence)
    }

    /// Write iCalendar text to a .ics file on disk
    pub fn write_file(&self, content: &str, path: &Path) -> Result<()> {
        fs::write(path, content).context(format!("Failed to write .ics file: {:?}", path))?;
        log::info!("Exported calendar to {:?}", path);
        Ok(())
    }
}
