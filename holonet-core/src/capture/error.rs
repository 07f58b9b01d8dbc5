//! Why a capture start was refused

use serde::{Deserialize, Serialize};

/// Reasons the bridge refuses to start chat log capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum CaptureErrorKind {
    /// A capture payload is already injected
    #[error("AlreadyInjected")]
    AlreadyInjected,
    /// No game process was found
    #[error("SwtorNotRunning")]
    SwtorNotRunning,
    /// The game's chat GUI settings prevent capture
    #[error("WrongGuiSettings")]
    WrongGuiSettings,
    /// The game build does not match the supported checksum
    #[error("UnsupportedVersion")]
    UnsupportedVersion,
    /// The game process was found but is not yet fully loaded
    #[error("NotYetFullyReady")]
    NotYetFullyReady,
}

impl CaptureErrorKind {
    /// Races that resolve on their own and are never shown to the user
    pub fn is_benign(self) -> bool {
        match self {
            Self::AlreadyInjected | Self::NotYetFullyReady => true,
            Self::SwtorNotRunning | Self::WrongGuiSettings | Self::UnsupportedVersion => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_kinds() {
        assert!(CaptureErrorKind::AlreadyInjected.is_benign());
        assert!(CaptureErrorKind::NotYetFullyReady.is_benign());
        assert!(!CaptureErrorKind::SwtorNotRunning.is_benign());
        assert!(!CaptureErrorKind::WrongGuiSettings.is_benign());
        assert!(!CaptureErrorKind::UnsupportedVersion.is_benign());
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&CaptureErrorKind::SwtorNotRunning).unwrap();
        assert_eq!(json, "\"SwtorNotRunning\"");
        let parsed: CaptureErrorKind = serde_json::from_str("\"NotYetFullyReady\"").unwrap();
        assert_eq!(parsed, CaptureErrorKind::NotYetFullyReady);
    }

    #[test]
    fn displays_variant_name() {
        assert_eq!(
            CaptureErrorKind::UnsupportedVersion.to_string(),
            "UnsupportedVersion"
        );
    }
}
