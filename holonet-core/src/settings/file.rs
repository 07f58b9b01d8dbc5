//! TOML settings file
//!
//! Default location is `settings.toml` in the holonet config directory
//! (see [`holonet_paths::settings_path`]).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::persistence::SettingsPersistence;
use super::types::Settings;
use crate::error::PersistenceError;

/// Settings persisted as a TOML file
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Settings file at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file at the default user location
    pub fn user() -> Self {
        Self::new(holonet_paths::settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; a missing file yields defaults
    pub fn read(&self) -> Result<Settings, PersistenceError> {
        if !self.path.exists() {
            debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write the file, creating parent directories as needed
    pub fn write(&self, settings: &Settings) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, contents)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsPersistence for SettingsFile {
    async fn load_settings(&self) -> Result<Settings, PersistenceError> {
        let file = self.clone();
        tokio::task::spawn_blocking(move || file.read())
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?
    }

    async fn persist_settings(&self, settings: Settings) -> Result<(), PersistenceError> {
        let file = self.clone();
        tokio::task::spawn_blocking(move || file.write(&settings))
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?
    }
}
