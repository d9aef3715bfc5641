//! Conversions from serenity models to scrollback records.

use chrono::{DateTime, Utc};
use scrollback_core::{
    ChannelId, ChannelInfo, ChannelKind, GuildId, GuildInfo, MessageId, MessageRecord, ThreadInfo,
};
use scrollback_error::{FetchError, ResourceKind};
use serenity::model::channel::{ChannelType, GuildChannel, Message};
use serenity::model::guild::PartialGuild;
use serenity::model::Timestamp;
use serenity::model::id as discord;
use std::num::NonZeroU64;

/// Map a Discord channel type onto a scrollback channel kind.
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::Text,
        ChannelType::News => ChannelKind::News,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Stage => ChannelKind::Stage,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::Forum => ChannelKind::Forum,
        ChannelType::Directory => ChannelKind::Directory,
        ChannelType::Private => ChannelKind::Dm,
        ChannelType::GroupDm => ChannelKind::GroupDm,
        ChannelType::PublicThread => ChannelKind::PublicThread,
        ChannelType::PrivateThread => ChannelKind::PrivateThread,
        ChannelType::NewsThread => ChannelKind::NewsThread,
        _ => ChannelKind::Unknown,
    }
}

pub(crate) fn channel_info(channel: &GuildChannel) -> ChannelInfo {
    ChannelInfo {
        id: ChannelId(channel.id.get()),
        guild_id: Some(GuildId(channel.guild_id.get())),
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
    }
}

/// `None` when the channel is not a thread or has no parent.
pub(crate) fn thread_info(channel: &GuildChannel) -> Option<ThreadInfo> {
    if !channel_kind(channel.kind).is_thread() {
        return None;
    }
    let parent = channel.parent_id?;
    Some(ThreadInfo {
        id: ChannelId(channel.id.get()),
        parent_id: ChannelId(parent.get()),
        guild_id: Some(GuildId(channel.guild_id.get())),
        name: channel.name.clone(),
        private: channel.kind == ChannelType::PrivateThread,
    })
}

pub(crate) fn guild_info(guild: &PartialGuild) -> GuildInfo {
    GuildInfo {
        id: GuildId(guild.id.get()),
        name: guild.name.clone(),
    }
}

pub(crate) fn message_record(message: &Message) -> MessageRecord {
    MessageRecord {
        id: MessageId(message.id.get()),
        channel_id: ChannelId(message.channel_id.get()),
        author: message.author.name.clone(),
        content: message.content.clone(),
        timestamp: datetime(&message.timestamp),
    }
}

/// Convert a Discord timestamp, keeping sub-second precision.
pub(crate) fn datetime(timestamp: &Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(timestamp.unix_timestamp(), timestamp.nanosecond())
        .unwrap_or_default()
}

/// Discord IDs are never zero; a zero ID can only name a missing resource.
#[track_caller]
pub(crate) fn discord_channel(id: ChannelId, resource: ResourceKind) -> Result<discord::ChannelId, FetchError> {
    NonZeroU64::new(id.get())
        .map(discord::ChannelId::from)
        .ok_or_else(|| FetchError::not_found(resource, id.get()))
}

#[track_caller]
pub(crate) fn discord_guild(id: GuildId) -> Result<discord::GuildId, FetchError> {
    NonZeroU64::new(id.get())
        .map(discord::GuildId::from)
        .ok_or_else(|| FetchError::not_found(ResourceKind::Guild, id.get()))
}

pub(crate) fn discord_message(id: MessageId) -> Option<discord::MessageId> {
    NonZeroU64::new(id.get()).map(discord::MessageId::from)
}
