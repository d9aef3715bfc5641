//! Progress notifications emitted while fetching.

use crate::{ChannelId, ChannelInfo, ChannelKind, GuildInfo, MessageRecord, ThreadInfo};
use serde::Serialize;

/// Why a resource produced an empty result without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum SkipReason {
    /// The channel is not text-bearing (voice, category, ...).
    #[display("not a text channel ({})", _0)]
    NotText(ChannelKind),
    /// The thread is private and the session lacks the manage-threads permission.
    #[display("missing manage-threads permission")]
    MissingPermission,
}

/// A notification produced while a fetch is in flight.
///
/// Observers see these in the order they happen; none of them is needed
/// for the final result to be correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchEvent {
    /// A page request returned, including the empty terminal one.
    Page {
        /// Channel or thread the page belongs to
        channel_id: ChannelId,
        /// Number of messages in the page
        size: usize,
        /// The page itself, newest first
        messages: Vec<MessageRecord>,
    },
    /// A channel pagination pass is starting.
    Channel(ChannelInfo),
    /// A thread pagination pass is starting.
    Thread {
        /// The thread being fetched
        thread: ThreadInfo,
        /// Its parent channel; `None` if the parent no longer resolves
        parent: Option<ChannelInfo>,
    },
    /// A guild fan-out is starting.
    Guild(GuildInfo),
    /// A resource was skipped and contributed nothing.
    Skipped {
        /// The skipped channel or thread
        resource: ChannelId,
        /// Why it was skipped
        reason: SkipReason,
    },
}

impl FetchEvent {
    /// Short event name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Page { .. } => "fetch",
            Self::Channel(_) => "fetch_channel",
            Self::Thread { .. } => "fetch_thread",
            Self::Guild(_) => "fetch_guild",
            Self::Skipped { .. } => "skipped",
        }
    }
}
