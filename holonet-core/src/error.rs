//! Error types for holonet-core

use thiserror::Error;

use crate::submit::SubmitError;

/// Top-level error type for holonet-core
#[derive(Error, Debug)]
pub enum HolonetError {
    #[error("Settings error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),
}

/// Errors from the settings persistence collaborator
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Settings storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from game bridge commands whose content the core does not inspect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Game bridge unavailable: {0}")]
    Unavailable(String),

    #[error("Bridge command failed: {0}")]
    CommandFailed(String),
}
