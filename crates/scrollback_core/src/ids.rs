//! Snowflake identifier newtypes.
//!
//! Channels and threads share [`ChannelId`]: on the platform a thread is a
//! channel attached to a parent.

use serde::{Deserialize, Serialize};

/// Identifier of a single message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct MessageId(pub u64);

/// Identifier of a channel or thread.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct ChannelId(pub u64);

/// Identifier of a guild.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct GuildId(pub u64);

impl MessageId {
    /// The raw snowflake.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl ChannelId {
    /// The raw snowflake.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl GuildId {
    /// The raw snowflake.
    pub fn get(self) -> u64 {
        self.0
    }
}
