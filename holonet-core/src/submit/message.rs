//! Outbound message batches

use serde::{Deserialize, Serialize};

/// Kind of outbound submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// Reaction sent from an emote button
    ButtonEmote,
    /// Message composed in the chat editor
    ChatMessage,
}

/// One submission request handed to the game bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessageBatch {
    pub message_type: MessageType,
    /// Character to post as; the bridge uses the active one when absent
    pub character_id: Option<u64>,
    pub messages: Vec<String>,
}

impl OutboundMessageBatch {
    /// Batch for the active character
    pub fn new(message_type: MessageType, messages: Vec<String>) -> Self {
        Self {
            message_type,
            character_id: None,
            messages,
        }
    }
}
