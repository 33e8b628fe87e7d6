use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema::MIGRATIONS;

/// One versioned schema step.
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

/// Version recorded in `PRAGMA user_version`; 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read schema version")
}

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .context("Failed to inspect table info")?;

    Ok(exists > 0)
}

/// Applies every migration newer than the recorded version, each in its own
/// transaction together with the version bump.
pub fn apply(conn: &Connection, migrations: &[Migration]) -> Result<()> {
    let current = schema_version(conn)?;

    for migration in migrations.iter().filter(|m| m.version > current) {
        log::info!(
            "Applying migration {}: {}",
            migration.version,
            migration.description
        );

        let batch = format!(
            "BEGIN;\n{};\nPRAGMA user_version = {};\nCOMMIT;",
            migration.sql, migration.version
        );

        if let Err(err) = conn.execute_batch(&batch) {
            // Leave the database at the last good version.
            if let Err(rollback) = conn.execute_batch("ROLLBACK") {
                log::warn!(
                    "Rollback of migration {} failed: {}",
                    migration.version,
                    rollback
                );
            }
            return Err(err).with_context(|| {
                format!(
                    "Migration {} ({}) failed",
                    migration.version, migration.description
                )
            });
        }
    }

    Ok(())
}
