//! Message submission: validation, retry policy and hand-off to the bridge

use std::sync::Arc;

use tracing::{debug, warn};

use super::error::SubmitError;
use super::message::{MessageType, OutboundMessageBatch};
use crate::bridge::GameBridge;
use crate::hook::HookStatusTracker;
use crate::settings::{Settings, SettingsStore};

/// Longest message the game accepts, in characters
pub const MAX_MESSAGE_LEN: usize = 255;

/// Trim every message and check it fits the game's limits
///
/// Messages are checked in order; the first offending one decides the error.
pub fn prepare_messages(messages: Vec<String>) -> Result<Vec<String>, SubmitError> {
    let trimmed: Vec<String> = messages
        .into_iter()
        .map(|message| message.trim().to_string())
        .collect();

    for message in &trimmed {
        let len = message.chars().count();
        if len == 0 {
            return Err(SubmitError::EmptyMessage);
        }
        if len > MAX_MESSAGE_LEN {
            return Err(SubmitError::LongMessage);
        }
    }

    Ok(trimmed)
}

/// Whether the bridge should retry a submission it cannot confirm
///
/// Confirmation relies on the captured chat log, and emote buttons are
/// never retried.
pub fn retry_policy(settings: &Settings, message_type: MessageType) -> bool {
    settings.chat.retry_message_submission
        && settings.chat_log.capture_chat_log
        && message_type != MessageType::ButtonEmote
}

/// Validates outbound batches and submits them through the game bridge
#[derive(Clone)]
pub struct MessageSubmitter {
    bridge: Arc<dyn GameBridge>,
    settings: SettingsStore,
    hook: HookStatusTracker,
}

impl MessageSubmitter {
    pub fn new(bridge: Arc<dyn GameBridge>, settings: SettingsStore, hook: HookStatusTracker) -> Self {
        Self {
            bridge,
            settings,
            hook,
        }
    }

    /// Validate and submit `messages`
    ///
    /// Nothing reaches the bridge unless every message passes validation.
    pub async fn submit(
        &self,
        message_type: MessageType,
        messages: Vec<String>,
    ) -> Result<(), SubmitError> {
        if !self.hook.is_hooked() {
            return Err(SubmitError::NotHookedIn);
        }

        let messages = prepare_messages(messages)?;
        let retry = retry_policy(&self.settings.get(), message_type);
        let batch = OutboundMessageBatch::new(message_type, messages);

        debug!(
            "Submitting {} message(s) as {:?}, retry={}",
            batch.messages.len(),
            message_type,
            retry
        );

        self.bridge.submit_messages(batch, retry).await.map_err(|e| {
            warn!("Bridge rejected submission: {}", e);
            SubmitError::Rejected(e)
        })
    }
}
