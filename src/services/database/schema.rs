use anyhow::Result;
use rusqlite::Connection;

use super::migrations::{self, Migration};

/// Ordered schema history. Append only: a shipped migration never changes.
pub(super) const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create event_templates",
        sql: "CREATE TABLE event_templates (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                start_time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                recurrence TEXT NOT NULL DEFAULT 'none',
                tradition TEXT,
                visibility TEXT NOT NULL DEFAULT 'global',
                creator_id TEXT,
                created_at TEXT NOT NULL
            )",
    },
    Migration {
        version: 2,
        description: "create practice_sessions",
        sql: "CREATE TABLE practice_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                template_id TEXT REFERENCES event_templates(id) ON DELETE SET NULL,
                started_at TEXT NOT NULL,
                duration_seconds INTEGER NOT NULL,
                completed INTEGER NOT NULL DEFAULT 1,
                notes TEXT
            )",
    },
    Migration {
        version: 3,
        description: "index template and session times",
        sql: "CREATE INDEX idx_event_templates_start ON event_templates(start_time);
              CREATE INDEX idx_practice_sessions_started ON practice_sessions(started_at)",
    },
];

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    migrations::apply(conn, MIGRATIONS)
}
