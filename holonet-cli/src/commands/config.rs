//! Settings commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use holonet_core::{Settings, SettingsFile, SettingsPersistence};
use toml_edit::DocumentMut;
use tracing::debug;

use crate::config::{parse_value, set_key};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current settings, with defaults filled in
    Show,
    /// Show the settings file path
    Path,
    /// Set one setting, e.g. `chat.enter_to_post true`
    Set {
        /// Dotted key
        key: String,
        /// New value, parsed as TOML (bare words are strings)
        value: String,
    },
    /// Restore default settings
    Reset,
}

pub async fn run(args: ConfigArgs) -> Result<()> {
    let file = SettingsFile::user();
    debug!("Settings file: {}", file.path().display());

    match args.command {
        ConfigCommands::Show => {
            print!("{}", render(&file).await?);
            Ok(())
        }
        ConfigCommands::Path => show_path(&file),
        ConfigCommands::Set { key, value } => {
            set(&file, &key, &value)?;
            println!("{} = {}", key, value);
            Ok(())
        }
        ConfigCommands::Reset => {
            reset(&file).await?;
            println!("Settings reset to defaults");
            Ok(())
        }
    }
}

async fn render(file: &SettingsFile) -> Result<String> {
    let settings = file.load_settings().await?;
    Ok(toml::to_string_pretty(&settings)?)
}

fn show_path(file: &SettingsFile) -> Result<()> {
    let path = file.path();
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not created yet)", path.display());
    }
    println!(
        "Override with {}=<path>",
        holonet_paths::SETTINGS_PATH_ENV
    );
    Ok(())
}

fn set(file: &SettingsFile, key: &str, value: &str) -> Result<Settings> {
    let path = file.path();
    let contents = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };
    let mut doc = contents
        .parse::<DocumentMut>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let settings = set_key(&mut doc, key, parse_value(value))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(settings)
}

async fn reset(file: &SettingsFile) -> Result<()> {
    file.persist_settings(Settings::default()).await?;
    Ok(())
}
