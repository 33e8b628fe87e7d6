use std::path::Path;

use anyhow::{bail, Result};

use meditation_calendar::models::settings::Settings;
use meditation_calendar::services::settings::SettingsService;

pub fn show(config: Option<&Path>) -> Result<()> {
    let service = SettingsService::at(config)?;
    let settings = service.load()?;

    println!("# {}", service.path().display());
    print!("{}", toml::to_string_pretty(&settings)?);
    println!(
        "# database: {}",
        SettingsService::database_path(&settings)?.display()
    );
    Ok(())
}

pub fn init(config: Option<&Path>, force: bool) -> Result<()> {
    let service = SettingsService::at(config)?;

    if service.path().exists() && !force {
        bail!(
            "{} already exists (use --force to replace it)",
            service.path().display()
        );
    }

    service.save(&Settings::default())?;
    println!("Wrote default settings to {}", service.path().display());
    Ok(())
}
