use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;

use meditation_calendar::models::settings::Settings;
use meditation_calendar::services::database::Database;
use meditation_calendar::services::settings::SettingsService;

/// Loaded settings plus where to find the database.
pub struct AppContext {
    pub settings: Settings,
    pub tz: Tz,
    database_path: PathBuf,
}

impl AppContext {
    pub fn load(config: Option<&Path>, database: Option<PathBuf>) -> Result<Self> {
        let service = SettingsService::at(config)?;
        let settings = service.load()?;
        let tz = settings.timezone().map_err(|e| anyhow!(e))?;

        let database_path = match database {
            Some(path) => path,
            None => SettingsService::database_path(&settings)?,
        };

        log::debug!(
            "Using settings from {:?} and database {:?}",
            service.path(),
            database_path
        );

        Ok(Self {
            settings,
            tz,
            database_path,
        })
    }

    /// Open the database, creating it and bringing the schema up to date.
    pub fn open_database(&self) -> Result<Database> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
        }

        let path = self
            .database_path
            .to_str()
            .ok_or_else(|| anyhow!("Database path {:?} is not valid UTF-8", self.database_path))?;

        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(db)
    }
}
