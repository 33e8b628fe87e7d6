use anyhow::{anyhow, bail, Result};
use chrono::{Duration, Utc};

use meditation_calendar::models::settings::MAX_WINDOW_DAYS;
use meditation_calendar::services::schedule::ScheduleService;
use meditation_calendar::services::template::TemplateService;
use meditation_calendar::utils::date::{format_in_zone, relative_to};

use super::print_json;
use crate::cli::context::AppContext;

pub fn run(ctx: &AppContext, days: Option<i64>, viewer: Option<&str>, json: bool) -> Result<()> {
    let days = days.unwrap_or(ctx.settings.upcoming_window_days);
    let window = listing_window(days)?;

    let db = ctx.open_database()?;
    let templates = TemplateService::new(db.connection());
    let now = Utc::now();

    let occurrences = ScheduleService::new(&templates).upcoming(
        now,
        window,
        ctx.settings.occurrences_per_template,
        viewer,
    )?;

    if json {
        return print_json(&occurrences);
    }

    if occurrences.is_empty() {
        println!("Nothing scheduled in the next {} days.", days);
        return Ok(());
    }

    for occurrence in &occurrences {
        println!(
            "{}  ({})  {}{}",
            format_in_zone(occurrence.start, ctx.tz),
            relative_to(occurrence.start, now),
            occurrence.title,
            occurrence
                .tradition
                .as_deref()
                .map(|t| format!(" [{}]", t))
                .unwrap_or_default(),
        );
        println!("    {}", occurrence.composite_id);
    }
    Ok(())
}

/// Look-ahead window, held to the same range as the configured default.
fn listing_window(days: i64) -> Result<Duration> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        bail!("--days must be between 1 and {}", MAX_WINDOW_DAYS);
    }
    Duration::try_days(days).ok_or_else(|| anyhow!("--days {} is out of range", days))
}
