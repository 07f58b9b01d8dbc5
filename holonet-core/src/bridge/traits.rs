//! GameBridge trait
//!
//! The bridge is everything on the far side of the core: the hook poller,
//! the capture injector and the keystroke writer that posts messages into
//! the game. The core only relies on this contract.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::capture::CaptureErrorKind;
use crate::error::BridgeError;
use crate::hook::HookNotification;
use crate::submit::OutboundMessageBatch;

/// Commands the core issues to, and notifications it receives from, the game side
#[async_trait]
pub trait GameBridge: Send + Sync {
    /// Ask the bridge to start looking for the game process
    ///
    /// The outcome arrives only through [`GameBridge::hook_notifications`].
    async fn begin_hook_attempt(&self) -> Result<(), BridgeError>;

    /// Subscribe to hooked-status notifications
    fn hook_notifications(&self) -> broadcast::Receiver<HookNotification>;

    /// Start the chat log capture subprocess
    async fn start_capture(&self) -> Result<(), CaptureErrorKind>;

    /// Stop the chat log capture subprocess
    async fn stop_capture(&self) -> Result<(), BridgeError>;

    /// Post a batch of messages into the game
    ///
    /// `retry` asks the bridge to re-post messages it cannot see echoed in
    /// the captured chat log. Errors are human-readable text.
    async fn submit_messages(&self, batch: OutboundMessageBatch, retry: bool) -> Result<(), String>;

    /// Open a link in the user's browser
    async fn open_external_link(&self, url: &str) -> Result<(), BridgeError>;
}
