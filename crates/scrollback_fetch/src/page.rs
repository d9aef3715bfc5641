//! Single-resource pagination: channels and threads.

use crate::Fetcher;
use scrollback_core::{
    ChannelId, ChannelInfo, ChannelRef, FetchEvent, MessageId, ResultSet, SkipReason, ThreadInfo,
    ThreadRef, ThreadSelection,
};
use scrollback_error::{FetchError, FetchErrorKind, ScrollbackResult};
use scrollback_interface::MessageSource;
use tracing::{debug, info, instrument};

impl<S: MessageSource> Fetcher<S> {
    /// Fetch the entire history of a text channel.
    ///
    /// Non-text channels (voice, category, ...) yield an empty set and a
    /// [`FetchEvent::Skipped`] event. With `include_threads`, the channel's
    /// active threads are fetched after its own history and appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel ID does not resolve or any page
    /// request fails.
    #[instrument(
        skip_all,
        fields(channel_id, include_threads = include_threads, message_count)
    )]
    pub async fn fetch_channel(
        &self,
        channel: impl Into<ChannelRef>,
        include_threads: bool,
    ) -> ScrollbackResult<ResultSet> {
        let channel = self.resolve_channel(channel.into()).await?;
        tracing::Span::current().record("channel_id", channel.id.get());

        if !channel.is_text() {
            self.skip(channel.id, SkipReason::NotText(channel.kind));
            return Ok(ResultSet::new());
        }

        let _fetching = self.begin();
        self.emit(|| FetchEvent::Channel(channel.clone()));

        let mut messages = self.drain(channel.id).await?;

        if include_threads {
            let threads = self
                .fetch_threads(ThreadSelection::Channel(ChannelRef::Handle(channel.clone())))
                .await?;
            messages.merge(threads);
        }

        tracing::Span::current().record("message_count", messages.len());
        info!(channel = %channel.name, count = messages.len(), "Fetched channel history");

        Ok(messages)
    }

    /// Fetch the entire history of a thread.
    ///
    /// A thread given by ID must carry its parent channel. Private threads
    /// are skipped with an empty result unless the session holds the
    /// manage-threads permission.
    ///
    /// # Errors
    ///
    /// Returns a misuse error, before any request, for a thread ID without a
    /// parent. Resolution and page failures propagate.
    #[instrument(skip_all, fields(thread_id = %thread.id(), message_count))]
    pub async fn fetch_thread(&self, thread: ThreadRef) -> ScrollbackResult<ResultSet> {
        let (thread, parent) = match thread {
            ThreadRef::Handle(info) => (info, None),
            ThreadRef::Id { thread, parent: None } => return Err(orphan_thread(thread).into()),
            ThreadRef::Id {
                thread,
                parent: Some(parent),
            } => {
                let parent = self.resolve_channel(parent).await?;
                if !parent.is_text() {
                    self.skip(parent.id, SkipReason::NotText(parent.kind));
                    return Ok(ResultSet::new());
                }
                let info = self.source().resolve_thread(&parent, thread).await?;
                (info, Some(parent))
            }
        };

        let messages = self.drain_thread(thread, parent).await?;
        tracing::Span::current().record("message_count", messages.len());
        Ok(messages)
    }

    /// Permission gate and pagination for an already resolved thread.
    ///
    /// A thread passed without its parent gets the parent looked up for the
    /// [`FetchEvent::Thread`] event, but only when someone is listening.
    pub(crate) async fn drain_thread(
        &self,
        thread: ThreadInfo,
        parent: Option<ChannelInfo>,
    ) -> ScrollbackResult<ResultSet> {
        if thread.private && !self.source().has_manage_permission(&thread).await? {
            self.skip(thread.id, SkipReason::MissingPermission);
            return Ok(ResultSet::new());
        }

        let parent = match parent {
            None if self.has_listeners() => self.thread_parent(&thread).await?,
            parent => parent,
        };

        let _fetching = self.begin();
        let thread_id = thread.id;
        let name = thread.name.clone();
        self.emit(move || FetchEvent::Thread { thread, parent });

        let messages = self.drain(thread_id).await?;
        info!(thread = %name, count = messages.len(), "Fetched thread history");
        Ok(messages)
    }

    /// The parent channel of a thread, or `None` if it no longer resolves.
    async fn thread_parent(&self, thread: &ThreadInfo) -> ScrollbackResult<Option<ChannelInfo>> {
        match self.source().resolve_channel(thread.parent_id).await {
            Ok(parent) => Ok(Some(parent)),
            Err(err) if err.as_fetch().is_some_and(|e| e.is_not_found()) => {
                debug!(thread_id = %thread.id, parent_id = %thread.parent_id, "Thread parent not found");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Request pages until one comes back empty.
    ///
    /// Each request after the first uses the ID of the previous page's last
    /// (oldest) message as its `before` cursor.
    async fn drain(&self, channel_id: ChannelId) -> ScrollbackResult<ResultSet> {
        let page_size = *self.config().page_size();
        let mut messages = ResultSet::new();
        let mut cursor: Option<MessageId> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source()
                .list_messages(channel_id, page_size, cursor)
                .await?;
            pages += 1;

            debug!(
                %channel_id,
                page = pages,
                size = page.len(),
                before = ?cursor,
                total = messages.len(),
                "Fetched page"
            );
            self.emit(|| FetchEvent::Page {
                channel_id,
                size: page.len(),
                messages: page.clone(),
            });

            let Some(last) = page.last() else {
                break;
            };
            cursor = Some(last.id);
            messages.extend(page);
        }

        Ok(messages)
    }
}

#[track_caller]
pub(crate) fn orphan_thread(thread: ChannelId) -> FetchError {
    FetchError::new(FetchErrorKind::Misuse(format!(
        "thread {} was given by ID without its parent channel",
        thread
    )))
}
