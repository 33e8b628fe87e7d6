// Test fixtures - reusable test data
// Provides consistent templates and databases across all test files

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use meditation_calendar::models::event_template::EventTemplate;
use meditation_calendar::models::recurrence::RecurrenceRule;
use meditation_calendar::services::database::Database;
use tempfile::TempDir;

pub const TEMPLATE_ID: &str = "3f2b8c1e-9d4a-4e6b-a1f0-7c5d2e8b9a41";

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// File-backed database in a fresh temporary directory.
///
/// The directory must outlive the database, so both are returned.
pub fn file_database() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meditation.db");
    let db = Database::new(path.to_str().unwrap()).expect("Failed to create database");
    db.initialize_schema().expect("Failed to initialize schema");
    (dir, db)
}

/// Sample templates for testing
pub mod templates {
    use super::*;

    /// Daily dawn sitting, 30 minutes from Jan 1 2024 06:00 UTC
    pub fn dawn_sit() -> EventTemplate {
        EventTemplate::builder()
            .title("Dawn Sit")
            .start(at(2024, 1, 1, 6, 0))
            .duration_minutes(30)
            .recurrence(RecurrenceRule::Daily)
            .tradition("Zen")
            .build()
            .unwrap()
    }

    /// Weekly Dharma talk on Wednesday evenings
    pub fn dharma_talk() -> EventTemplate {
        EventTemplate::builder()
            .title("Dharma Talk")
            .description("Talk followed by questions")
            .start(at(2024, 1, 3, 19, 0))
            .duration_minutes(90)
            .recurrence(RecurrenceRule::Weekly)
            .tradition("Theravada")
            .build()
            .unwrap()
    }

    /// Monthly sitting anchored on the 31st
    pub fn month_end_retreat() -> EventTemplate {
        EventTemplate::builder()
            .title("Month-End Retreat")
            .start(at(2024, 1, 31, 9, 0))
            .duration_minutes(240)
            .recurrence(RecurrenceRule::Monthly)
            .build()
            .unwrap()
    }

    /// One-time private sitting owned by `creator`
    pub fn private_sit(creator: &str) -> EventTemplate {
        EventTemplate::builder()
            .title("Home Practice")
            .start(at(2024, 1, 2, 21, 0))
            .duration_minutes(20)
            .private(creator)
            .build()
            .unwrap()
    }
}
