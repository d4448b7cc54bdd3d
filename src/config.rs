use std::path::PathBuf;

use anyhow::{anyhow, Result};
use toml::Value;

const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug)]
pub struct Config {
    database: DatabaseConfig,
    settings: SettingsConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub create_if_missing: bool,
    pub busy_timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsConfig {
    pub export_path: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(config: Value) -> Result<Self> {
        let database = parse_database_config(
            config
                .get("database")
                .ok_or(anyhow!("Missing or invalid database settings"))?,
        )?;

        let settings = match config.get("settings") {
            Some(value) => parse_settings_config(value)?,
            None => SettingsConfig::default(),
        };

        Ok(Config { database, settings })
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    pub fn settings(&self) -> &SettingsConfig {
        &self.settings
    }
}

fn parse_database_config(config: &Value) -> Result<DatabaseConfig> {
    let path = config
        .get("path")
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow!("Missing or invalid database path"))?
        .into();

    let create_if_missing = match config.get("create_if_missing") {
        Some(value) => value
            .as_bool()
            .ok_or_else(|| anyhow!("Invalid create_if_missing, expected a boolean"))?,
        None => false,
    };

    let busy_timeout_secs = match config.get("busy_timeout_secs") {
        Some(value) => value
            .as_integer()
            .ok_or_else(|| anyhow!("Invalid busy_timeout_secs, expected an integer"))?
            .try_into()?,
        None => DEFAULT_BUSY_TIMEOUT_SECS,
    };

    Ok(DatabaseConfig {
        path,
        create_if_missing,
        busy_timeout_secs,
    })
}

fn parse_settings_config(config: &Value) -> Result<SettingsConfig> {
    let export_path = match config.get("export_path") {
        Some(value) => Some(
            value
                .as_str()
                .ok_or_else(|| anyhow!("Invalid export_path, expected a string"))?
                .into(),
        ),
        None => None,
    };

    Ok(SettingsConfig { export_path })
}
