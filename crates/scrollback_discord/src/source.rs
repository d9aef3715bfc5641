//! [`MessageSource`] over serenity's REST client.

use crate::conversions::{
    channel_info, discord_channel, discord_guild, discord_message, guild_info, message_record,
    thread_info,
};
use crate::error::{history_error, lookup_error, platform_error};
use async_trait::async_trait;
use scrollback_core::{
    ChannelId, ChannelInfo, ChannelKind, GuildId, GuildInfo, MessageId, MessageRecord, ThreadInfo,
};
use scrollback_error::{FetchError, ResourceKind, ScrollbackResult};
use scrollback_interface::MessageSource;
use serenity::http::{GuildPagination, Http, MessagePagination};
use serenity::model::channel::{Channel, GuildChannel};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Largest page Discord returns when listing the session's guilds.
const GUILD_PAGE: u64 = 200;

/// Message source backed by the Discord REST API.
///
/// Rate limiting is handled by serenity's HTTP ratelimiter.
pub struct SerenityMessageSource {
    http: Arc<Http>,
}

impl SerenityMessageSource {
    /// Create a source with its own HTTP client for the given bot token.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        info!("Creating standalone Discord message source");
        Self {
            http: Arc::new(Http::new(token.as_ref())),
        }
    }

    /// Create a source sharing an existing HTTP client.
    pub fn with_http(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }

    async fn guild_channel(
        &self,
        id: ChannelId,
        resource: ResourceKind,
    ) -> ScrollbackResult<GuildChannel> {
        let channel = self
            .http
            .get_channel(discord_channel(id, resource)?)
            .await
            .map_err(|e| lookup_error(e, resource, id.get()))?;
        channel
            .guild()
            .ok_or_else(|| FetchError::not_found(resource, id.get()).into())
    }

    /// Every active thread in a guild, from a single request.
    async fn active_threads(&self, guild_id: GuildId) -> ScrollbackResult<Vec<ThreadInfo>> {
        let active = self
            .http
            .get_guild_active_threads(discord_guild(guild_id)?)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Guild, guild_id.get()))?;
        Ok(active.threads.iter().filter_map(thread_info).collect())
    }
}

#[async_trait]
impl MessageSource for SerenityMessageSource {
    #[instrument(skip(self), fields(channel_id = id.get()))]
    async fn resolve_channel(&self, id: ChannelId) -> ScrollbackResult<ChannelInfo> {
        let channel = self
            .http
            .get_channel(discord_channel(id, ResourceKind::Channel)?)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Channel, id.get()))?;

        match channel {
            Channel::Guild(channel) => Ok(channel_info(&channel)),
            Channel::Private(channel) => Ok(ChannelInfo {
                id,
                guild_id: None,
                name: channel.name(),
                kind: ChannelKind::Dm,
            }),
            _ => Err(FetchError::not_found(ResourceKind::Channel, id.get()).into()),
        }
    }

    #[instrument(skip(self), fields(guild_id = id.get()))]
    async fn resolve_guild(&self, id: GuildId) -> ScrollbackResult<GuildInfo> {
        let guild = self
            .http
            .get_guild(discord_guild(id)?)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Guild, id.get()))?;
        Ok(guild_info(&guild))
    }

    #[instrument(skip(self, parent), fields(parent_id = parent.id.get(), thread_id = id.get()))]
    async fn resolve_thread(
        &self,
        parent: &ChannelInfo,
        id: ChannelId,
    ) -> ScrollbackResult<ThreadInfo> {
        let channel = self.guild_channel(id, ResourceKind::Thread).await?;
        match thread_info(&channel) {
            Some(thread) if thread.parent_id == parent.id => Ok(thread),
            _ => {
                debug!("Channel is not a thread of the given parent");
                Err(FetchError::not_found(ResourceKind::Thread, id.get()).into())
            }
        }
    }

    #[instrument(skip(self), fields(received))]
    async fn list_messages(
        &self,
        channel: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> ScrollbackResult<Vec<MessageRecord>> {
        let target = before
            .and_then(discord_message)
            .map(MessagePagination::Before);
        let messages = self
            .http
            .get_messages(
                discord_channel(channel, ResourceKind::Channel)?,
                target,
                Some(limit),
            )
            .await
            .map_err(|e| history_error(e, channel.get()))?;

        tracing::Span::current().record("received", messages.len());
        Ok(messages.iter().map(message_record).collect())
    }

    #[instrument(skip(self, guild), fields(guild_id = guild.id.get(), channel_count))]
    async fn list_text_channels(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ChannelInfo>> {
        let mut channels = self
            .http
            .get_channels(discord_guild(guild.id)?)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Guild, guild.id.get()))?;
        channels.sort_by_key(|c| (c.position, c.id));

        let channels: Vec<ChannelInfo> = channels
            .iter()
            .map(channel_info)
            .filter(ChannelInfo::is_text)
            .collect();

        tracing::Span::current().record("channel_count", channels.len());
        Ok(channels)
    }

    #[instrument(skip(self, channel), fields(channel_id = channel.id.get(), thread_count))]
    async fn list_threads(&self, channel: &ChannelInfo) -> ScrollbackResult<Vec<ThreadInfo>> {
        let Some(guild_id) = channel.guild_id else {
            debug!("Channel has no guild, so no threads");
            return Ok(Vec::new());
        };

        let threads: Vec<ThreadInfo> = self
            .active_threads(guild_id)
            .await?
            .into_iter()
            .filter(|t| t.parent_id == channel.id)
            .collect();

        tracing::Span::current().record("thread_count", threads.len());
        Ok(threads)
    }

    #[instrument(skip(self, guild), fields(guild_id = guild.id.get(), thread_count))]
    async fn list_guild_threads(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ThreadInfo>> {
        let threads = self.active_threads(guild.id).await?;
        tracing::Span::current().record("thread_count", threads.len());
        Ok(threads)
    }

    #[instrument(skip(self, thread), fields(thread_id = thread.id.get(), allowed))]
    async fn has_manage_permission(&self, thread: &ThreadInfo) -> ScrollbackResult<bool> {
        let Some(guild_id) = thread.guild_id else {
            return Ok(false);
        };
        let discord_guild_id = discord_guild(guild_id)?;

        let user = self
            .http
            .get_current_user()
            .await
            .map_err(platform_error)?;
        let member = self
            .http
            .get_member(discord_guild_id, user.id)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Member, user.id.get()))?;
        let guild = self
            .http
            .get_guild(discord_guild_id)
            .await
            .map_err(|e| lookup_error(e, ResourceKind::Guild, guild_id.get()))?;
        let parent = self
            .guild_channel(thread.parent_id, ResourceKind::Channel)
            .await?;

        let permissions = guild.user_permissions_in(&parent, &member);
        let allowed = permissions.manage_threads() || permissions.administrator();

        tracing::Span::current().record("allowed", allowed);
        Ok(allowed)
    }

    #[instrument(skip(self), fields(guild_count))]
    async fn known_guilds(&self) -> ScrollbackResult<Vec<GuildInfo>> {
        let mut guilds = Vec::new();
        let mut after = None;

        loop {
            let page = self
                .http
                .get_guilds(after.map(GuildPagination::After), Some(GUILD_PAGE))
                .await
                .map_err(platform_error)?;
            let full = page.len() as u64 == GUILD_PAGE;
            after = page.last().map(|g| g.id);
            guilds.extend(page.into_iter().map(|g| GuildInfo {
                id: GuildId(g.id.get()),
                name: g.name,
            }));
            if !full || after.is_none() {
                break;
            }
        }

        tracing::Span::current().record("guild_count", guilds.len());
        Ok(guilds)
    }
}
