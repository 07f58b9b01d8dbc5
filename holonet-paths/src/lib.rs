//! XDG Base Directory paths for holonet.
//!
//! The companion keeps its files in XDG locations on every platform so the
//! settings file sits in the same place whether the game runs natively or
//! under a compatibility layer.

use std::path::PathBuf;

/// Environment variable that overrides the settings file location.
pub const SETTINGS_PATH_ENV: &str = "HOLONET_SETTINGS_PATH";

const APP_DIR: &str = "holonet";

/// Get the holonet config directory.
///
/// Returns `$XDG_CONFIG_HOME/holonet` if set, otherwise `~/.config/holonet`.
///
/// # Examples
///
/// ```
/// use holonet_paths::config_dir;
///
/// let config = config_dir();
/// let settings = config.join("settings.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config").join(APP_DIR)
    } else {
        PathBuf::from(".config").join(APP_DIR)
    }
}

/// Path of the settings file.
///
/// `HOLONET_SETTINGS_PATH` wins when set (isolated tests, portable installs),
/// otherwise `settings.toml` inside [`config_dir`].
pub fn settings_path() -> PathBuf {
    match std::env::var(SETTINGS_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_dir().join("settings.toml"),
    }
}
