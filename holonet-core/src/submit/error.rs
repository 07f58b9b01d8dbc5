//! Submission errors

use thiserror::Error;

/// Why a batch was not submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("SWTOR not hooked in. Have you launched the game?")]
    NotHookedIn,

    #[error("Empty message detected. Please remove it.")]
    EmptyMessage,

    #[error("Long message detected. Please shorten it.")]
    LongMessage,

    /// The bridge's own error text, passed through unchanged
    #[error("{0}")]
    Rejected(String),
}
