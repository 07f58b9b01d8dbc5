//! User settings: record types, persistence and the settings store

pub mod channel;
pub mod file;
pub mod persistence;
pub mod store;
pub mod types;

pub use channel::SwtorChannel;
pub use file::SettingsFile;
pub use persistence::{MemorySettings, SettingsPersistence};
pub use store::SettingsStore;
pub use types::{ChatLogSettings, ChatSettings, ChatTab, Settings};
