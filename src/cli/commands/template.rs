use anyhow::{anyhow, Result};

use meditation_calendar::models::event_template::EventTemplate;
use meditation_calendar::models::recurrence::RecurrenceRule;
use meditation_calendar::services::template::TemplateService;
use meditation_calendar::utils::date::format_in_zone;

use super::{parse_instant, print_json};
use crate::cli::context::AppContext;

pub struct NewTemplate {
    pub title: String,
    pub start: String,
    pub duration: Option<i64>,
    pub recurrence: String,
    pub tradition: Option<String>,
    pub description: Option<String>,
    pub private: bool,
    pub creator: Option<String>,
}

pub fn add(ctx: &AppContext, args: NewTemplate) -> Result<()> {
    let recurrence: RecurrenceRule = args.recurrence.parse()?;

    let mut builder = EventTemplate::builder()
        .title(args.title)
        .start(parse_instant(&args.start)?)
        .duration_minutes(args.duration.unwrap_or(ctx.settings.default_duration_minutes))
        .recurrence(recurrence);

    if let Some(tradition) = args.tradition {
        builder = builder.tradition(tradition);
    }
    if let Some(description) = args.description {
        builder = builder.description(description);
    }
    builder = match (args.private, args.creator) {
        (true, Some(creator)) => builder.private(creator),
        (false, Some(creator)) => builder.creator(creator),
        (_, None) => builder,
    };

    let template = builder.build().map_err(|e| anyhow!(e))?;

    let db = ctx.open_database()?;
    let created = TemplateService::new(db.connection()).create(template)?;

    println!("Created {} ({})", created.title, created.id);
    Ok(())
}

pub fn list(ctx: &AppContext, json: bool) -> Result<()> {
    let db = ctx.open_database()?;
    let templates = TemplateService::new(db.connection()).list_all()?;

    if json {
        return print_json(&templates);
    }

    if templates.is_empty() {
        println!("No templates yet. Add one with `meditation-calendar template add`.");
        return Ok(());
    }

    for template in &templates {
        println!(
            "{}  {:<7}  {:>4} min  {}  {}{}",
            template.id,
            template.recurrence,
            template.duration_minutes,
            format_in_zone(template.start, ctx.tz),
            template.title,
            template
                .tradition
                .as_deref()
                .map(|t| format!(" [{}]", t))
                .unwrap_or_default(),
        );
    }
    Ok(())
}

pub fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let db = ctx.open_database()?;
    TemplateService::new(db.connection()).delete(id)?;
    println!("Deleted template {}", id);
    Ok(())
}
