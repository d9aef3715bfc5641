//! Tagged inputs for the fetch operations.
//!
//! Each operation takes either an identifier that still has to be resolved
//! against the platform or a handle that was resolved earlier.

use crate::{ChannelId, ChannelInfo, GuildId, GuildInfo, ThreadInfo};

/// A channel, by ID or already resolved.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ChannelRef {
    /// Resolve through the platform first
    Id(ChannelId),
    /// Already resolved
    Handle(ChannelInfo),
}

impl ChannelRef {
    /// The channel's identifier.
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Id(id) => *id,
            Self::Handle(info) => info.id,
        }
    }
}

/// A guild, by ID or already resolved.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum GuildRef {
    /// Resolve through the platform first
    Id(GuildId),
    /// Already resolved
    Handle(GuildInfo),
}

impl GuildRef {
    /// The guild's identifier.
    pub fn id(&self) -> GuildId {
        match self {
            Self::Id(id) => *id,
            Self::Handle(info) => info.id,
        }
    }
}

/// A thread, either resolved or identified through its parent channel.
///
/// Threads can only be resolved through their parent, so an `Id` without a
/// parent is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadRef {
    /// Already resolved
    Handle(ThreadInfo),
    /// Resolve through the parent channel
    Id {
        /// The thread's identifier
        thread: ChannelId,
        /// The channel the thread belongs to
        parent: Option<ChannelRef>,
    },
}

impl ThreadRef {
    /// A thread identified by ID under a known parent.
    pub fn by_id(thread: impl Into<ChannelId>, parent: impl Into<ChannelRef>) -> Self {
        Self::Id {
            thread: thread.into(),
            parent: Some(parent.into()),
        }
    }

    /// The thread's identifier.
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Handle(info) => info.id,
            Self::Id { thread, .. } => *thread,
        }
    }

    /// True for an ID that cannot be resolved because it lacks a parent.
    pub fn is_orphan(&self) -> bool {
        matches!(self, Self::Id { parent: None, .. })
    }
}

impl From<ThreadInfo> for ThreadRef {
    fn from(info: ThreadInfo) -> Self {
        Self::Handle(info)
    }
}

/// Which guilds a multi-guild fetch walks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuildSelection {
    /// Every guild the session knows about
    #[default]
    Known,
    /// Exactly these guilds, in this order
    Only(Vec<GuildRef>),
}

/// Which threads a thread fetch walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadSelection {
    /// Active threads of every text channel in the guild
    Guild(GuildRef),
    /// Active threads of one channel
    Channel(ChannelRef),
    /// Exactly these threads, in this order
    Threads(Vec<ThreadRef>),
}

/// One entry of a salvaging batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// A single channel
    Channel {
        /// The channel
        channel: ChannelRef,
        /// Also fetch its active threads
        include_threads: bool,
    },
    /// A single thread
    Thread(ThreadRef),
    /// Every text channel of a guild
    Guild {
        /// The guild
        guild: GuildRef,
        /// Also fetch active threads
        include_threads: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_id_without_parent_is_orphan() {
        let orphan = ThreadRef::Id {
            thread: ChannelId(5),
            parent: None,
        };
        assert!(orphan.is_orphan());
        assert!(!ThreadRef::by_id(ChannelId(5), ChannelId(1)).is_orphan());
        assert_eq!(orphan.id(), ChannelId(5));
    }

    #[test]
    fn refs_convert_from_ids() {
        let channel: ChannelRef = ChannelId(9).into();
        assert_eq!(channel.id(), ChannelId(9));
        let guild: GuildRef = GuildId(3).into();
        assert_eq!(guild.id(), GuildId(3));
    }
}
