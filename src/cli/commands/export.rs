use std::path::Path;

use anyhow::{bail, Result};
use chrono::Utc;

use meditation_calendar::services::detail::OccurrenceResolver;
use meditation_calendar::services::icalendar::ICalendarService;
use meditation_calendar::services::template::TemplateService;

use crate::cli::context::AppContext;

pub fn run(ctx: &AppContext, occurrence_id: &str, output: Option<&Path>) -> Result<()> {
    let db = ctx.open_database()?;
    let templates = TemplateService::new(db.connection());

    let Some(resolved) = OccurrenceResolver::new(&templates).resolve(occurrence_id, Utc::now())?
    else {
        bail!("Event not found: {}", occurrence_id);
    };

    let ical = ICalendarService::new();
    let content = ical.export_occurrence(&resolved);

    match output {
        Some(path) => ical.write_file(&content, path),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
