//! In-game chat channels a chat tab can include

use serde::{Deserialize, Serialize};

/// A SWTOR chat channel, serialized as the game's numeric channel id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum SwtorChannel {
    Say,
    Yell,
    Emote,
    Whisper,
    PlayerAfk,
    Global,
    Pvp,
    Trade,
    Group,
    Ops,
    Guild,
    PlayerNotFound,
}

impl SwtorChannel {
    /// Every known channel, ordered by id
    pub const ALL: [SwtorChannel; 12] = [
        Self::Say,
        Self::Yell,
        Self::Emote,
        Self::Whisper,
        Self::PlayerAfk,
        Self::Global,
        Self::Pvp,
        Self::Trade,
        Self::Group,
        Self::Ops,
        Self::Guild,
        Self::PlayerNotFound,
    ];

    /// The game's numeric id for this channel
    pub fn id(self) -> i32 {
        match self {
            Self::Say => 1,
            Self::Yell => 2,
            Self::Emote => 3,
            Self::Whisper => 4,
            Self::PlayerAfk => 8,
            Self::Global => 51,
            Self::Pvp => 52,
            Self::Trade => 53,
            Self::Group => 54,
            Self::Ops => 55,
            Self::Guild => 57,
            Self::PlayerNotFound => 1003,
        }
    }
}

impl From<SwtorChannel> for i32 {
    fn from(channel: SwtorChannel) -> Self {
        channel.id()
    }
}

impl TryFrom<i32> for SwtorChannel {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.id() == id)
            .ok_or_else(|| format!("unknown chat channel id {id}"))
    }
}
