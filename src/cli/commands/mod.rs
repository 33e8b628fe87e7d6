pub mod config;
pub mod export;
pub mod practice;
pub mod show;
pub mod template;
pub mod upcoming;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("'{}' is not an RFC 3339 timestamp", value))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
