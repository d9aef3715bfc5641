//! Sequential fan-out over channels, guilds and threads.

use crate::Fetcher;
use crate::page::orphan_thread;
use scrollback_core::{
    ChannelInfo, ChannelMessages, ChannelRef, FetchEvent, FetchTarget, GuildInfo, GuildRef,
    GuildSelection, ResultSet, SkipReason, ThreadInfo, ThreadRef, ThreadSelection,
};
use scrollback_error::{ScrollbackError, ScrollbackResult};
use scrollback_interface::MessageSource;
use tracing::{info, instrument, warn};

/// Result of a salvaging batch fetch.
///
/// Holds everything gathered before the first failure, the number of
/// targets that completed, and the failure itself if there was one.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Messages from the targets that completed
    pub messages: ResultSet,
    /// How many targets were fully fetched
    pub completed: usize,
    /// The error that stopped the batch
    pub failure: Option<ScrollbackError>,
}

impl BatchOutcome {
    /// True when every target was fetched.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Convert to the all-or-nothing form.
    ///
    /// # Errors
    ///
    /// Returns the recorded failure, dropping the partial messages.
    pub fn into_result(self) -> ScrollbackResult<ResultSet> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.messages),
        }
    }
}

impl<S: MessageSource> Fetcher<S> {
    /// Fetch several channels one after the other and concatenate the results.
    ///
    /// # Errors
    ///
    /// The first failing channel aborts the whole call.
    #[instrument(skip_all, fields(channel_count, include_threads = include_threads))]
    pub async fn fetch_channels<I>(
        &self,
        channels: I,
        include_threads: bool,
    ) -> ScrollbackResult<ResultSet>
    where
        I: IntoIterator,
        I::Item: Into<ChannelRef>,
    {
        let channels: Vec<ChannelRef> = channels.into_iter().map(Into::into).collect();
        tracing::Span::current().record("channel_count", channels.len());

        let _fetching = self.begin();
        let mut messages = ResultSet::new();
        for channel in channels {
            messages.merge(self.fetch_channel(channel, include_threads).await?);
        }

        Ok(messages)
    }

    /// Fetch every text channel of a guild.
    ///
    /// # Errors
    ///
    /// Returns an error if the guild does not resolve, its channels cannot
    /// be listed, or any channel fetch fails.
    #[instrument(skip_all, fields(guild_id, include_threads = include_threads, message_count))]
    pub async fn fetch_guild(
        &self,
        guild: impl Into<GuildRef>,
        include_threads: bool,
    ) -> ScrollbackResult<ResultSet> {
        let _fetching = self.begin();
        let (guild, channels) = self.guild_text_channels(guild.into()).await?;

        if !include_threads {
            let messages = self
                .fetch_channels(channels.into_iter().map(ChannelRef::Handle), false)
                .await?;
            tracing::Span::current().record("message_count", messages.len());
            return Ok(messages);
        }

        // One guild-wide thread listing, handed out to each channel in turn.
        let mut threads = self.source().list_guild_threads(&guild).await?;
        let mut messages = ResultSet::new();
        for channel in channels {
            messages.merge(self.fetch_channel(ChannelRef::Handle(channel.clone()), false).await?);

            let (own, rest): (Vec<ThreadInfo>, Vec<ThreadInfo>) = threads
                .into_iter()
                .partition(|t| t.parent_id == channel.id);
            threads = rest;
            for thread in own {
                messages.merge(self.drain_thread(thread, Some(channel.clone())).await?);
            }
        }

        tracing::Span::current().record("message_count", messages.len());
        Ok(messages)
    }

    /// Fetch several guilds, or every guild the session knows about.
    ///
    /// # Errors
    ///
    /// The first failing guild aborts the whole call.
    #[instrument(skip_all, fields(guild_count, include_threads = include_threads))]
    pub async fn fetch_guilds(
        &self,
        guilds: GuildSelection,
        include_threads: bool,
    ) -> ScrollbackResult<ResultSet> {
        let _fetching = self.begin();
        let guilds: Vec<GuildRef> = match guilds {
            GuildSelection::Known => self
                .source()
                .known_guilds()
                .await?
                .into_iter()
                .map(GuildRef::Handle)
                .collect(),
            GuildSelection::Only(guilds) => guilds,
        };
        tracing::Span::current().record("guild_count", guilds.len());

        let mut messages = ResultSet::new();
        for guild in guilds {
            messages.merge(self.fetch_guild(guild, include_threads).await?);
        }

        Ok(messages)
    }

    /// Fetch a selection of threads.
    ///
    /// Only active threads are found when walking a guild or a channel.
    /// Threads are resolved first, then drained one at a time in order.
    ///
    /// # Errors
    ///
    /// Returns a misuse error, before any request, if an explicit thread ID
    /// lacks its parent. Resolution and page failures propagate.
    #[instrument(skip_all, fields(thread_count, message_count))]
    pub async fn fetch_threads(&self, selection: ThreadSelection) -> ScrollbackResult<ResultSet> {
        if let ThreadSelection::Threads(threads) = &selection
            && let Some(orphan) = threads.iter().find(|t| t.is_orphan())
        {
            return Err(orphan_thread(orphan.id()).into());
        }

        let _fetching = self.begin();
        let threads = self.resolve_threads(selection).await?;
        tracing::Span::current().record("thread_count", threads.len());

        let mut messages = ResultSet::new();
        for (thread, parent) in threads {
            messages.merge(self.drain_thread(thread, parent).await?);
        }

        tracing::Span::current().record("message_count", messages.len());
        Ok(messages)
    }

    /// Fetch a guild and group message contents per text channel.
    ///
    /// Every text channel gets an entry, in listing order, even when it has
    /// no messages. Threads are not included.
    ///
    /// # Errors
    ///
    /// Same as [`Fetcher::fetch_guild`].
    #[instrument(skip_all, fields(guild_id))]
    pub async fn fetch_guild_grouped(
        &self,
        guild: impl Into<GuildRef>,
    ) -> ScrollbackResult<Vec<ChannelMessages>> {
        let _fetching = self.begin();
        let (_, channels) = self.guild_text_channels(guild.into()).await?;

        let mut groups = Vec::with_capacity(channels.len());
        for channel in channels {
            let channel_id = channel.id;
            let messages = self.fetch_channel(channel, false).await?;
            groups.push(ChannelMessages {
                channel_id,
                contents: messages.into_iter().map(|m| m.content).collect(),
            });
        }

        Ok(groups)
    }

    /// Fetch a list of targets, keeping what was gathered if one fails.
    ///
    /// Stops at the first failure; targets after it are not attempted.
    #[instrument(skip_all, fields(target_count = targets.len()))]
    pub async fn fetch_batch(&self, targets: Vec<FetchTarget>) -> BatchOutcome {
        let _fetching = self.begin();
        let mut outcome = BatchOutcome {
            messages: ResultSet::new(),
            completed: 0,
            failure: None,
        };

        for target in targets {
            let result = match target {
                FetchTarget::Channel {
                    channel,
                    include_threads,
                } => self.fetch_channel(channel, include_threads).await,
                FetchTarget::Thread(thread) => self.fetch_thread(thread).await,
                FetchTarget::Guild {
                    guild,
                    include_threads,
                } => self.fetch_guild(guild, include_threads).await,
            };

            match result {
                Ok(messages) => {
                    outcome.messages.merge(messages);
                    outcome.completed += 1;
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        completed = outcome.completed,
                        kept = outcome.messages.len(),
                        "Batch stopped early"
                    );
                    outcome.failure = Some(err);
                    break;
                }
            }
        }

        outcome
    }

    /// Resolve a guild, announce it, and list its text channels.
    async fn guild_text_channels(
        &self,
        guild: GuildRef,
    ) -> ScrollbackResult<(GuildInfo, Vec<ChannelInfo>)> {
        let guild = self.resolve_guild(guild).await?;
        tracing::Span::current().record("guild_id", guild.id.get());

        self.emit(|| FetchEvent::Guild(guild.clone()));

        let channels: Vec<ChannelInfo> = self
            .source()
            .list_text_channels(&guild)
            .await?
            .into_iter()
            .filter(ChannelInfo::is_text)
            .collect();

        info!(guild = %guild.name, channels = channels.len(), "Listed guild text channels");
        Ok((guild, channels))
    }

    /// Turn a thread selection into resolved threads paired with their parents.
    async fn resolve_threads(
        &self,
        selection: ThreadSelection,
    ) -> ScrollbackResult<Vec<(ThreadInfo, Option<ChannelInfo>)>> {
        let mut resolved = Vec::new();

        match selection {
            ThreadSelection::Guild(guild) => {
                let guild = self.resolve_guild(guild).await?;
                let channels = self.source().list_text_channels(&guild).await?;
                let threads = self.source().list_guild_threads(&guild).await?;
                for channel in channels.into_iter().filter(ChannelInfo::is_text) {
                    resolved.extend(
                        threads
                            .iter()
                            .filter(|t| t.parent_id == channel.id)
                            .map(|t| (t.clone(), Some(channel.clone()))),
                    );
                }
            }
            ThreadSelection::Channel(channel) => {
                let channel = self.resolve_channel(channel).await?;
                if channel.is_text() {
                    self.push_active_threads(channel, &mut resolved).await?;
                } else {
                    self.skip(channel.id, SkipReason::NotText(channel.kind));
                }
            }
            ThreadSelection::Threads(threads) => {
                for thread in threads {
                    match thread {
                        ThreadRef::Handle(info) => resolved.push((info, None)),
                        ThreadRef::Id {
                            thread,
                            parent: Some(parent),
                        } => {
                            let parent = self.resolve_channel(parent).await?;
                            if !parent.is_text() {
                                self.skip(parent.id, SkipReason::NotText(parent.kind));
                                continue;
                            }
                            let info = self.source().resolve_thread(&parent, thread).await?;
                            resolved.push((info, Some(parent)));
                        }
                        ThreadRef::Id { thread, parent: None } => {
                            return Err(orphan_thread(thread).into());
                        }
                    }
                }
            }
        }

        Ok(resolved)
    }

    async fn push_active_threads(
        &self,
        channel: ChannelInfo,
        resolved: &mut Vec<(ThreadInfo, Option<ChannelInfo>)>,
    ) -> ScrollbackResult<()> {
        let threads = self.source().list_threads(&channel).await?;
        resolved.extend(threads.into_iter().map(|t| (t, Some(channel.clone()))));
        Ok(())
    }
}
