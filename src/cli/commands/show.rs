use anyhow::{bail, Result};
use chrono::Utc;

use meditation_calendar::models::occurrence::OccurrenceStatus;
use meditation_calendar::services::detail::OccurrenceResolver;
use meditation_calendar::services::template::TemplateService;
use meditation_calendar::utils::date::{format_in_zone, relative_to, time_in_zone};

use super::print_json;
use crate::cli::context::AppContext;

pub fn run(ctx: &AppContext, occurrence_id: &str, json: bool) -> Result<()> {
    let db = ctx.open_database()?;
    let templates = TemplateService::new(db.connection());
    let now = Utc::now();

    let Some(resolved) = OccurrenceResolver::new(&templates).resolve(occurrence_id, now)? else {
        bail!("Event not found: {}", occurrence_id);
    };

    if json {
        return print_json(&resolved);
    }

    let occurrence = &resolved.occurrence;
    let template = &resolved.template;

    println!("{}", template.title);
    if let Some(tradition) = &template.tradition {
        println!("Tradition:  {}", tradition);
    }
    println!(
        "When:       {} - {}",
        format_in_zone(occurrence.start, ctx.tz),
        time_in_zone(occurrence.end, ctx.tz)
    );
    println!("Repeats:    {}", template.recurrence);

    let status = match resolved.status {
        OccurrenceStatus::Upcoming => format!("starts {}", relative_to(occurrence.start, now)),
        OccurrenceStatus::InProgress => {
            format!("in progress, ends {}", relative_to(occurrence.end, now))
        }
        OccurrenceStatus::Ended => "ended".to_string(),
    };
    println!("Status:     {}", status);

    if resolved.rescheduled {
        println!("            (the requested sitting has passed; showing the next one)");
    }
    if let Some(description) = &template.description {
        println!();
        println!("{}", description);
    }
    println!();
    println!("Id:         {}", occurrence.composite_id);
    Ok(())
}
