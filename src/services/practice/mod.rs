// Practice history service
// Records completed sittings and summarizes a user's practice

use std::collections::BTreeSet;

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::models::session::PracticeSession;
use crate::services::database::utc_from_column;

/// Summary of the practice history as of a given day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PracticeStats {
    pub total_sessions: i64,
    pub total_minutes: i64,
    /// Consecutive UTC days with practice, ending today or yesterday.
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
}

pub struct PracticeService<'a> {
    conn: &'a Connection,
}

impl<'a> PracticeService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, mut session: PracticeSession) -> Result<PracticeSession> {
        if session.duration_seconds < 0 {
            return Err(anyhow!("Session duration cannot be negative"));
        }

        self.conn
            .execute(
                "INSERT INTO practice_sessions (template_id, started_at, duration_seconds, completed, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    session.template_id,
                    session.started_at.to_rfc3339(),
                    session.duration_seconds,
                    session.completed as i32,
                    session.notes,
                ],
            )
            .context("Failed to record practice session")?;

        session.id = Some(self.conn.last_insert_rowid());
        log::info!(
            "Recorded {} minute practice session{}",
            session.minutes(),
            if session.completed { "" } else { " (ended early)" }
        );
        Ok(session)
    }

    /// Most recent sessions first.
    pub fn history(&self, limit: usize) -> Result<Vec<PracticeSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, template_id, started_at, duration_seconds, completed, notes
             FROM practice_sessions
             ORDER BY started_at DESC, id DESC
             LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let sessions = stmt
            .query_map(params![limit], map_session_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to fetch practice history")?;

        Ok(sessions)
    }

    pub fn stats(&self, today: NaiveDate) -> Result<PracticeStats> {
        let (total_sessions, total_seconds): (i64, i64) = self
            .conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(duration_seconds), 0) FROM practice_sessions",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .context("Failed to summarize practice history")?;

        let mut stmt = self
            .conn
            .prepare("SELECT started_at FROM practice_sessions")?;
        let days = stmt
            .query_map([], |row| utc_from_column(row.get(0)?, 0))?
            .map(|started| started.map(|dt| dt.date_naive()))
            .collect::<rusqlite::Result<BTreeSet<_>>>()
            .context("Failed to read practice days")?;

        Ok(PracticeStats {
            total_sessions,
            total_minutes: total_seconds / 60,
            current_streak_days: current_streak(&days, today),
            longest_streak_days: longest_streak(&days),
        })
    }
}

/// Streak ending today, or yesterday when today has no session yet.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if day - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

fn map_session_row(row: &Row<'_>) -> rusqlite::Result<PracticeSession> {
    Ok(PracticeSession {
        id: Some(row.get(0)?),
        template_id: row.get(1)?,
        started_at: utc_from_column(row.get(2)?, 2)?,
        duration_seconds: row.get(3)?,
        completed: row.get::<_, i32>(4)? != 0,
        notes: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_template::EventTemplate;
    use crate::services::database::Database;
    use crate::services::template::TemplateService;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn morning(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 6, 30, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_assigns_id() {
        let db = setup_test_db();
        let service = PracticeService::new(db.connection());

        let recorded = service
            .record(PracticeSession::logged(morning(2024, 5, 1), 20).unwrap())
            .unwrap();
        assert!(recorded.id.is_some());
    }

    #[test]
    fn test_history_newest_first() {
        let db = setup_test_db();
        let service = PracticeService::new(db.connection());

        for day in [1, 3, 2] {
            service
                .record(PracticeSession::logged(morning(2024, 5, day), 10).unwrap())
                .unwrap();
        }

        let history = service.history(2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].started_at, morning(2024, 5, 3));
        assert_eq!(history[1].started_at, morning(2024, 5, 2));
    }

    #[test]
    fn test_stats_totals_and_streaks() {
        let db = setup_test_db();
        let service = PracticeService::new(db.connection());

        for (day, minutes) in [(1, 10), (2, 20), (3, 15), (3, 5), (6, 30), (7, 25)] {
            service
                .record(PracticeSession::logged(morning(2024, 5, day), minutes).unwrap())
                .unwrap();
        }

        let stats = service.stats(date(2024, 5, 8)).unwrap();
        assert_eq!(
            stats,
            PracticeStats {
                total_sessions: 6,
                total_minutes: 105,
                current_streak_days: 2,
                longest_streak_days: 3,
            }
        );
    }

    #[test]
    fn test_streak_broken_by_missed_day() {
        let db = setup_test_db();
        let service = PracticeService::new(db.connection());

        service
            .record(PracticeSession::logged(morning(2024, 5, 1), 10).unwrap())
            .unwrap();

        let stats = service.stats(date(2024, 5, 3)).unwrap();
        assert_eq!(stats.current_streak_days, 0);
        assert_eq!(stats.longest_streak_days, 1);
    }

    #[test]
    fn test_empty_history_stats() {
        let db = setup_test_db();
        let service = PracticeService::new(db.connection());

        assert_eq!(service.stats(date(2024, 5, 3)).unwrap(), PracticeStats::default());
    }

    #[test]
    fn test_deleting_template_keeps_history() {
        let db = setup_test_db();
        let templates = TemplateService::new(db.connection());
        let practice = PracticeService::new(db.connection());

        let template = templates
            .create(EventTemplate::new("Group Sit", morning(2024, 5, 1), 30).unwrap())
            .unwrap();

        let mut session = PracticeSession::logged(morning(2024, 5, 1), 30).unwrap();
        session.template_id = Some(template.id.clone());
        practice.record(session).unwrap();

        templates.delete(&template.id).unwrap();

        let history = practice.history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].template_id, None);
    }
}
