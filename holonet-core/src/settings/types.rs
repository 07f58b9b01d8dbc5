//! The user's settings record

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::channel::SwtorChannel;

/// Complete settings record
///
/// Every section decodes with defaults for missing fields, so a partial or
/// older stored record still yields a fully populated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub chat: ChatSettings,
    pub chat_log: ChatLogSettings,
}

/// Chat composition preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Ask before posting a composed message
    pub confirmation_before_posting: bool,
    /// Enter posts instead of inserting a newline
    pub enter_to_post: bool,
    /// Clear the composer after a successful post
    pub clear_chat_after_posting: bool,
    /// Strip leading pronouns from emotes
    pub remove_starting_pronouns: bool,
    /// Lowercase the first character of emotes
    pub starting_characters_are_lowercase: bool,
    /// Show the captured chat log window
    pub show_chat_log_window: bool,
    /// Ask the bridge to retry submissions it cannot confirm
    pub retry_message_submission: bool,
    /// Tabs of the chat log window
    pub chat_tabs: Vec<ChatTab>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            confirmation_before_posting: true,
            enter_to_post: false,
            clear_chat_after_posting: false,
            remove_starting_pronouns: false,
            starting_characters_are_lowercase: true,
            show_chat_log_window: false,
            retry_message_submission: false,
            chat_tabs: vec![ChatTab::local()],
        }
    }
}

/// A named tab filtering the chat log to a set of channels
///
/// An empty channel set is representable; the UI decides whether to allow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTab {
    pub name: String,
    #[serde(default)]
    pub channels: BTreeSet<SwtorChannel>,
}

impl ChatTab {
    pub fn new(name: impl Into<String>, channels: impl IntoIterator<Item = SwtorChannel>) -> Self {
        Self {
            name: name.into(),
            channels: channels.into_iter().collect(),
        }
    }

    /// The default "Local" tab: emote, say, yell and whisper
    pub fn local() -> Self {
        Self::new(
            "Local",
            [
                SwtorChannel::Emote,
                SwtorChannel::Say,
                SwtorChannel::Yell,
                SwtorChannel::Whisper,
            ],
        )
    }
}

/// Chat log capture preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatLogSettings {
    /// Whether the user wants the chat log captured
    pub capture_chat_log: bool,
    /// Character ini to read character context from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_ini_to_pull_from: Option<String>,
}
