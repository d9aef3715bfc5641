//! Core data types for the Scrollback message history fetcher.
//!
//! This crate provides the platform-neutral model shared by the fetcher and
//! the platform adapters: snowflake identifiers, message records, channel,
//! thread and guild descriptions, the deduplicating [`ResultSet`], the
//! progress [`FetchEvent`]s, and the tagged resource selectors accepted by
//! each fetch operation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod config;
mod event;
mod ids;
mod message;
mod result_set;
mod selector;

pub use channel::{ChannelInfo, ChannelKind, GuildInfo, ThreadInfo};
pub use config::{FetcherConfig, FetcherConfigBuilder, MAX_PAGE_SIZE};
pub use event::{FetchEvent, SkipReason};
pub use ids::{ChannelId, GuildId, MessageId};
pub use message::MessageRecord;
pub use result_set::{ChannelMessages, ResultSet};
pub use selector::{ChannelRef, FetchTarget, GuildRef, GuildSelection, ThreadRef, ThreadSelection};
