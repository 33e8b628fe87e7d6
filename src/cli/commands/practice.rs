use std::io::{self, Write};
use std::thread;
use std::time::Duration as StdDuration;

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, Utc};

use meditation_calendar::models::event_template::MAX_DURATION_MINUTES;
use meditation_calendar::models::session::{MeditationTimer, PracticeSession, TimerState};
use meditation_calendar::services::practice::PracticeService;
use meditation_calendar::services::template::TemplateService;
use meditation_calendar::utils::date::{clock, format_in_zone};

use super::{parse_instant, print_json};
use crate::cli::context::AppContext;

pub fn log(
    ctx: &AppContext,
    minutes: i64,
    started: Option<&str>,
    template: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let length = sitting_length(minutes)?;
    let started_at = match started {
        Some(value) => parse_instant(value)?,
        None => Utc::now() - length,
    };

    let mut session = PracticeSession::logged(started_at, minutes).map_err(|e| anyhow!(e))?;
    session.notes = notes;

    let db = ctx.open_database()?;
    session.template_id = checked_template(&TemplateService::new(db.connection()), template)?;

    let recorded = PracticeService::new(db.connection()).record(session)?;
    println!("Logged {} minutes", recorded.minutes());
    Ok(())
}

pub fn sit(ctx: &AppContext, minutes: Option<i64>, template: Option<String>) -> Result<()> {
    let length = sitting_length(minutes.unwrap_or(ctx.settings.default_duration_minutes))?;

    let db = ctx.open_database()?;
    let template_id = checked_template(&TemplateService::new(db.connection()), template)?;

    let mut timer = MeditationTimer::new(
        length,
        Duration::seconds(ctx.settings.preparation_seconds),
    );
    timer.start(Utc::now())?;

    let mut stdout = io::stdout();
    loop {
        let now = Utc::now();
        let label = match timer.tick(now) {
            TimerState::Preparing => "Settle in",
            TimerState::InProgress => "Sitting",
            TimerState::Paused => "Paused",
            TimerState::Completed => break,
        };
        write!(stdout, "\r{:<10} {}", label, clock(timer.remaining(now).num_seconds()))?;
        stdout.flush()?;
        thread::sleep(StdDuration::from_secs(1));
    }
    writeln!(stdout)?;

    let session = timer
        .into_session(template_id)
        .ok_or_else(|| anyhow!("Timer stopped before the sitting completed"))?;

    let recorded = PracticeService::new(db.connection()).record(session)?;
    println!("Sat for {} minutes", recorded.minutes());
    Ok(())
}

pub fn history(ctx: &AppContext, limit: usize, json: bool) -> Result<()> {
    let db = ctx.open_database()?;
    let sessions = PracticeService::new(db.connection()).history(limit)?;

    if json {
        return print_json(&sessions);
    }

    if sessions.is_empty() {
        println!("No sittings recorded yet.");
        return Ok(());
    }

    for session in &sessions {
        println!(
            "{}  {:>4} min{}{}",
            format_in_zone(session.started_at, ctx.tz),
            session.minutes(),
            if session.completed { "" } else { "  (ended early)" },
            session
                .notes
                .as_deref()
                .map(|n| format!("  {}", n))
                .unwrap_or_default(),
        );
    }
    Ok(())
}

pub fn stats(ctx: &AppContext, json: bool) -> Result<()> {
    let db = ctx.open_database()?;
    let stats = PracticeService::new(db.connection()).stats(Utc::now().date_naive())?;

    if json {
        return print_json(&stats);
    }

    println!("Sittings:        {}", stats.total_sessions);
    println!("Minutes:         {}", stats.total_minutes);
    println!("Current streak:  {} days", stats.current_streak_days);
    println!("Longest streak:  {} days", stats.longest_streak_days);
    Ok(())
}

/// Length of one sitting, at most a day like a template's duration.
fn sitting_length(minutes: i64) -> Result<Duration> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        bail!(
            "A sitting must last between 1 and {} minutes",
            MAX_DURATION_MINUTES
        );
    }
    Duration::try_minutes(minutes).ok_or_else(|| anyhow!("{} minutes is out of range", minutes))
}

/// Confirm a referenced template exists before linking a session to it.
fn checked_template(
    templates: &TemplateService<'_>,
    template: Option<String>,
) -> Result<Option<String>> {
    match template {
        Some(id) if templates.get(&id)?.is_none() => bail!("Template {} not found", id),
        other => Ok(other),
    }
}
