//! User-visible notices
//!
//! Every outcome the core reports is silent, info or error. Silent outcomes
//! publish nothing; the other two go out on a broadcast feed for the UI to
//! render as toasts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Default capacity of the notice broadcast channel
pub const DEFAULT_NOTICE_CAPACITY: usize = 64;

/// Severity of a notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Broadcast feed of notices
#[derive(Debug, Clone)]
pub struct NoticeFeed {
    tx: broadcast::Sender<Notice>,
}

impl NoticeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to notices published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(Notice::new(NoticeLevel::Info, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notice::new(NoticeLevel::Error, message));
    }

    pub fn publish(&self, notice: Notice) {
        debug!("Notice ({:?}): {}", notice.level, notice.message);
        // No receivers is fine
        let _ = self.tx.send(notice);
    }
}

impl Default for NoticeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_CAPACITY)
    }
}
