//! Settings persistence collaborator

use std::sync::Mutex;

use async_trait::async_trait;

use super::types::Settings;
use crate::error::PersistenceError;

/// Where settings are loaded from and saved to
///
/// The store calls `load_settings` once per explicit load and
/// `persist_settings` after every change, in change order.
#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    /// Read the stored settings record
    async fn load_settings(&self) -> Result<Settings, PersistenceError>;

    /// Replace the stored settings record
    async fn persist_settings(&self, settings: Settings) -> Result<(), PersistenceError>;
}

/// In-memory persistence for tests and ephemeral sessions
///
/// Records every persisted value so callers can inspect write order.
#[derive(Debug, Default)]
pub struct MemorySettings {
    stored: Mutex<Option<Settings>>,
    writes: Mutex<Vec<Settings>>,
    fail_loads: bool,
}

impl MemorySettings {
    /// Empty storage; loading yields defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `settings`
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            stored: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    /// Storage whose loads always fail
    pub fn unavailable() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    /// Every value persisted so far, oldest first
    pub fn writes(&self) -> Vec<Settings> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recently stored value
    pub fn stored(&self) -> Option<Settings> {
        self.stored.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SettingsPersistence for MemorySettings {
    async fn load_settings(&self) -> Result<Settings, PersistenceError> {
        if self.fail_loads {
            return Err(PersistenceError::Unavailable(
                "memory storage configured to fail".to_string(),
            ));
        }
        Ok(self.stored().unwrap_or_default())
    }

    async fn persist_settings(&self, settings: Settings) -> Result<(), PersistenceError> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(settings.clone());
        *self.stored.lock().unwrap_or_else(|e| e.into_inner()) = Some(settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_memory_loads_defaults() {
        let storage = MemorySettings::new();
        let settings = storage.load_settings().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn persisted_value_is_loaded_back() {
        let storage = MemorySettings::new();
        let mut settings = Settings::default();
        settings.chat.enter_to_post = true;

        storage.persist_settings(settings.clone()).await.unwrap();

        assert_eq!(storage.load_settings().await.unwrap(), settings);
        assert_eq!(storage.writes().len(), 1);
    }

    #[tokio::test]
    async fn unavailable_storage_fails_loads() {
        let storage = MemorySettings::unavailable();
        let result = storage.load_settings().await;
        assert!(matches!(result, Err(PersistenceError::Unavailable(_))));
    }
}
