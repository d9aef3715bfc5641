//! In-memory message source for fetcher tests.
//!
//! Messages get descending IDs so that "newest first" and "older than the
//! cursor" work the same way they do on the platform.

use async_trait::async_trait;
use chrono::DateTime;
use scrollback_core::{
    ChannelId, ChannelInfo, ChannelKind, GuildId, GuildInfo, MessageId, MessageRecord, ThreadInfo,
};
use scrollback_error::{FetchError, FetchErrorKind, ResourceKind, ScrollbackResult};
use scrollback_interface::MessageSource;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A call the fetcher made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ResolveChannel(ChannelId),
    ResolveGuild(GuildId),
    ResolveThread(ChannelId),
    ListMessages {
        channel: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    },
    ListTextChannels(GuildId),
    ListThreads(ChannelId),
    ListGuildThreads(GuildId),
    Permission(ChannelId),
    KnownGuilds,
}

#[derive(Default)]
pub struct MockSource {
    guilds: Vec<GuildInfo>,
    channels: HashMap<ChannelId, ChannelInfo>,
    guild_channels: HashMap<GuildId, Vec<ChannelId>>,
    threads: HashMap<ChannelId, Vec<ThreadInfo>>,
    messages: HashMap<ChannelId, Vec<MessageRecord>>,
    failing: HashSet<ChannelId>,
    manage_permission: bool,
    requests: Mutex<Vec<Request>>,
}

/// Build `count` messages for a channel, newest (highest ID) first.
pub fn history(channel: ChannelId, count: usize) -> Vec<MessageRecord> {
    (0..count)
        .map(|i| {
            let seq = (count - i) as u64;
            MessageRecord {
                id: MessageId(channel.get() * 1_000_000 + seq),
                channel_id: channel,
                author: format!("user{}", seq % 3),
                content: format!("message {} in {}", seq, channel),
                timestamp: DateTime::from_timestamp(1_600_000_000 + seq as i64, 0)
                    .unwrap_or_default(),
            }
        })
        .collect()
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guild(mut self, id: u64) -> Self {
        self.guilds.push(GuildInfo {
            id: GuildId(id),
            name: format!("guild-{id}"),
        });
        self
    }

    pub fn text_channel(self, guild: u64, id: u64, count: usize) -> Self {
        self.channel(guild, id, ChannelKind::Text, count)
    }

    pub fn voice_channel(self, guild: u64, id: u64) -> Self {
        self.channel(guild, id, ChannelKind::Voice, 0)
    }

    pub fn channel(mut self, guild: u64, id: u64, kind: ChannelKind, count: usize) -> Self {
        let channel = ChannelId(id);
        self.channels.insert(
            channel,
            ChannelInfo {
                id: channel,
                guild_id: Some(GuildId(guild)),
                name: format!("channel-{id}"),
                kind,
            },
        );
        self.guild_channels
            .entry(GuildId(guild))
            .or_default()
            .push(channel);
        self.messages.insert(channel, history(channel, count));
        self
    }

    pub fn thread(mut self, parent: u64, id: u64, count: usize, private: bool) -> Self {
        let thread = ChannelId(id);
        let guild_id = self
            .channels
            .get(&ChannelId(parent))
            .and_then(|c| c.guild_id);
        self.threads
            .entry(ChannelId(parent))
            .or_default()
            .push(ThreadInfo {
                id: thread,
                parent_id: ChannelId(parent),
                guild_id,
                name: format!("thread-{id}"),
                private,
            });
        self.messages.insert(thread, history(thread, count));
        self
    }

    pub fn with_manage_permission(mut self) -> Self {
        self.manage_permission = true;
        self
    }

    /// Make every page request for this channel fail.
    pub fn failing(mut self, id: u64) -> Self {
        self.failing.insert(ChannelId(id));
        self
    }

    pub fn channel_info(&self, id: u64) -> ChannelInfo {
        self.channels[&ChannelId(id)].clone()
    }

    pub fn thread_info(&self, parent: u64, id: u64) -> ThreadInfo {
        self.threads[&ChannelId(parent)]
            .iter()
            .find(|t| t.id == ChannelId(id))
            .cloned()
            .expect("thread registered")
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Page requests in order, as `(channel, before)`.
    pub fn page_requests(&self) -> Vec<(ChannelId, Option<MessageId>)> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::ListMessages {
                    channel, before, ..
                } => Some((channel, before)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, request: Request) {
        self.requests.lock().expect("requests lock").push(request);
    }
}

#[async_trait]
impl MessageSource for MockSource {
    async fn resolve_channel(&self, id: ChannelId) -> ScrollbackResult<ChannelInfo> {
        self.record(Request::ResolveChannel(id));
        self.channels
            .get(&id)
            .cloned()
            .ok_or_else(|| FetchError::not_found(ResourceKind::Channel, id.get()).into())
    }

    async fn resolve_guild(&self, id: GuildId) -> ScrollbackResult<GuildInfo> {
        self.record(Request::ResolveGuild(id));
        self.guilds
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| FetchError::not_found(ResourceKind::Guild, id.get()).into())
    }

    async fn resolve_thread(
        &self,
        parent: &ChannelInfo,
        id: ChannelId,
    ) -> ScrollbackResult<ThreadInfo> {
        self.record(Request::ResolveThread(id));
        self.threads
            .get(&parent.id)
            .and_then(|threads| threads.iter().find(|t| t.id == id))
            .cloned()
            .ok_or_else(|| FetchError::not_found(ResourceKind::Thread, id.get()).into())
    }

    async fn list_messages(
        &self,
        channel: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> ScrollbackResult<Vec<MessageRecord>> {
        self.record(Request::ListMessages {
            channel,
            limit,
            before,
        });
        tokio::task::yield_now().await;

        if self.failing.contains(&channel) {
            return Err(FetchError::new(FetchErrorKind::Platform(format!(
                "history unavailable for {channel}"
            )))
            .into());
        }

        Ok(self
            .messages
            .get(&channel)
            .map(|all| {
                all.iter()
                    .filter(|m| before.is_none_or(|cursor| m.id < cursor))
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_text_channels(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ChannelInfo>> {
        self.record(Request::ListTextChannels(guild.id));
        Ok(self
            .guild_channels
            .get(&guild.id)
            .map(|ids| {
                ids.iter()
                    .map(|id| self.channels[id].clone())
                    .filter(|c| c.kind.is_text())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_threads(&self, channel: &ChannelInfo) -> ScrollbackResult<Vec<ThreadInfo>> {
        self.record(Request::ListThreads(channel.id));
        Ok(self.threads.get(&channel.id).cloned().unwrap_or_default())
    }

    async fn list_guild_threads(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ThreadInfo>> {
        self.record(Request::ListGuildThreads(guild.id));
        Ok(self
            .guild_channels
            .get(&guild.id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.threads.get(id))
                    .flatten()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn has_manage_permission(&self, thread: &ThreadInfo) -> ScrollbackResult<bool> {
        self.record(Request::Permission(thread.id));
        Ok(self.manage_permission)
    }

    async fn known_guilds(&self) -> ScrollbackResult<Vec<GuildInfo>> {
        self.record(Request::KnownGuilds);
        Ok(self.guilds.clone())
    }
}
