//! The platform operations the fetcher depends on.

use async_trait::async_trait;
use scrollback_core::{
    ChannelId, ChannelInfo, GuildId, GuildInfo, MessageId, MessageRecord, ThreadInfo,
};
use scrollback_error::ScrollbackResult;

/// Access to a chat platform's resources and message history.
///
/// Implementations own authentication, rate limiting and transport; the
/// fetcher calls these methods strictly one at a time.
///
/// # Errors
///
/// Resolution methods return a `NotFound` fetch error when the identifier
/// does not name an accessible resource. Any other failure is reported as a
/// `Platform` fetch error. The fetcher never retries.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Resolve a channel by ID.
    async fn resolve_channel(&self, id: ChannelId) -> ScrollbackResult<ChannelInfo>;

    /// Resolve a guild by ID.
    async fn resolve_guild(&self, id: GuildId) -> ScrollbackResult<GuildInfo>;

    /// Resolve a thread through its parent channel.
    async fn resolve_thread(
        &self,
        parent: &ChannelInfo,
        id: ChannelId,
    ) -> ScrollbackResult<ThreadInfo>;

    /// List up to `limit` messages, newest first, strictly older than `before`.
    ///
    /// With `before = None` the most recent page is returned. An empty page
    /// means the history is exhausted.
    async fn list_messages(
        &self,
        channel: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> ScrollbackResult<Vec<MessageRecord>>;

    /// Text channels of a guild, threads excluded.
    async fn list_text_channels(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ChannelInfo>>;

    /// Active threads attached to a channel.
    async fn list_threads(&self, channel: &ChannelInfo) -> ScrollbackResult<Vec<ThreadInfo>>;

    /// Active threads of every channel in a guild.
    ///
    /// The default lists the guild's text channels and asks each for its
    /// threads. Sources that can list a guild's threads in one call should
    /// override it.
    async fn list_guild_threads(&self, guild: &GuildInfo) -> ScrollbackResult<Vec<ThreadInfo>> {
        let mut threads = Vec::new();
        for channel in self.list_text_channels(guild).await? {
            threads.extend(self.list_threads(&channel).await?);
        }
        Ok(threads)
    }

    /// Whether the session may read the thread when it is private.
    async fn has_manage_permission(&self, thread: &ThreadInfo) -> ScrollbackResult<bool>;

    /// Every guild the session is a member of.
    async fn known_guilds(&self) -> ScrollbackResult<Vec<GuildInfo>>;
}
