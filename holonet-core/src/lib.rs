//! holonet-core: synchronization core of the holonet SWTOR chat companion
//!
//! This crate keeps three independently changing facts consistent:
//!
//! - **Hook status** - [`HookStatusTracker`], whether the game process is attached
//! - **Settings** - [`SettingsStore`], the user's persisted configuration
//! - **Capture state** - [`CaptureCoordinator`], whether the chat log capture runs
//!
//! and gates outbound chat through the [`MessageSubmitter`]. The
//! [`Companion`] wires them together.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use holonet_core::{Companion, MessageType, MockBridge, SettingsFile};
//!
//! async fn example() {
//!     let bridge = Arc::new(MockBridge::new());
//!     let companion = Companion::start(bridge, Arc::new(SettingsFile::user())).await;
//!
//!     companion.update_settings(|s| s.chat_log.capture_chat_log = true);
//!
//!     if let Err(e) = companion
//!         .submit(MessageType::ChatMessage, vec!["/e waves".to_string()])
//!         .await
//!     {
//!         eprintln!("{e}");
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//!  GameBridge ──hook notifications──▶ HookStatusTracker ──┐
//!      ▲                                                   ├──▶ CaptureCoordinator ──start/stop──▶ GameBridge
//!      │                         SettingsStore ────────────┘            │
//!      │                              │                                 ▼
//!      └──────submit_messages──── MessageSubmitter                 NoticeFeed
//! ```

pub mod bridge;
pub mod capture;
pub mod companion;
pub mod error;
pub mod hook;
pub mod notices;
pub mod settings;
pub mod store;
pub mod submit;

// Re-export key types for convenience
pub use bridge::{BridgeCall, GameBridge, MockBridge};
pub use capture::{CaptureCoordinator, CaptureErrorKind, CaptureStatus, ReconcileTrigger};
pub use companion::Companion;
pub use error::{BridgeError, HolonetError, PersistenceError};
pub use hook::{HookNotification, HookStatusTracker};
pub use notices::{Notice, NoticeFeed, NoticeLevel};
pub use settings::{
    ChatLogSettings, ChatSettings, ChatTab, MemorySettings, Settings, SettingsFile,
    SettingsPersistence, SettingsStore, SwtorChannel,
};
pub use store::{Observable, SubscriptionId};
pub use submit::{
    MAX_MESSAGE_LEN, MessageSubmitter, MessageType, OutboundMessageBatch, SubmitError,
    prepare_messages, retry_policy,
};
