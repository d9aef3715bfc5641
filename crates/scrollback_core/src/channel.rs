//! Channel, thread and guild descriptions.

use crate::{ChannelId, GuildId};
use serde::{Deserialize, Serialize};

/// Platform channel types, collapsed to what the fetcher needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Guild text channel
    #[display("text")]
    Text,
    /// Announcement channel
    #[display("news")]
    News,
    /// Voice channel
    #[display("voice")]
    Voice,
    /// Stage channel
    #[display("stage")]
    Stage,
    /// Category grouping other channels
    #[display("category")]
    Category,
    /// Forum channel (posts are threads)
    #[display("forum")]
    Forum,
    /// Hub directory channel
    #[display("directory")]
    Directory,
    /// Media channel
    #[display("media")]
    Media,
    /// Direct message
    #[display("dm")]
    Dm,
    /// Group direct message
    #[display("group_dm")]
    GroupDm,
    /// Public thread
    #[display("public_thread")]
    PublicThread,
    /// Private thread
    #[display("private_thread")]
    PrivateThread,
    /// Thread in an announcement channel
    #[display("news_thread")]
    NewsThread,
    /// Anything the platform adds later
    #[display("unknown")]
    Unknown,
}

impl ChannelKind {
    /// True for channels whose history the fetcher pages through directly.
    ///
    /// Only guild text and announcement channels qualify; threads are
    /// fetched through the thread operations.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::News)
    }

    /// True for the three thread kinds.
    pub fn is_thread(self) -> bool {
        matches!(
            self,
            Self::PublicThread | Self::PrivateThread | Self::NewsThread
        )
    }
}

/// A resolved channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel identifier
    pub id: ChannelId,
    /// Owning guild, `None` for direct messages
    pub guild_id: Option<GuildId>,
    /// Channel name
    pub name: String,
    /// Channel type
    pub kind: ChannelKind,
}

impl ChannelInfo {
    /// True when the channel can be paged through.
    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

/// A resolved thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    /// Thread identifier
    pub id: ChannelId,
    /// Channel the thread is attached to
    pub parent_id: ChannelId,
    /// Owning guild
    pub guild_id: Option<GuildId>,
    /// Thread name
    pub name: String,
    /// Private threads require the manage-threads permission
    pub private: bool,
}

/// A resolved guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildInfo {
    /// Guild identifier
    pub id: GuildId,
    /// Guild name
    pub name: String,
}
