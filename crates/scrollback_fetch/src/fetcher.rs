//! The fetcher instance: source, settings, fetching flag and observers.

use scrollback_core::{
    ChannelId, ChannelInfo, ChannelRef, FetchEvent, FetcherConfig, GuildInfo, GuildRef, SkipReason,
};
use scrollback_error::ScrollbackResult;
use scrollback_interface::{FetchObserver, MessageSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

/// Pages through message history and aggregates the results.
///
/// The fetcher owns its [`MessageSource`]. Progress is reported to
/// registered observers and event streams; neither is required.
pub struct Fetcher<S> {
    source: S,
    config: FetcherConfig,
    in_flight: AtomicUsize,
    observers: Vec<Arc<dyn FetchObserver>>,
    subscribers: Mutex<Vec<UnboundedSender<FetchEvent>>>,
}

impl<S: MessageSource> Fetcher<S> {
    /// Create a fetcher with default settings and no observers.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: FetcherConfig::default(),
            in_flight: AtomicUsize::new(0),
            observers: Vec::new(),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Replace the settings.
    pub fn with_config(mut self, config: FetcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an observer. Observers are called in registration order.
    pub fn with_observer(mut self, observer: impl FetchObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Register a shared observer.
    pub fn with_shared_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Open a stream of every event emitted from now on.
    ///
    /// The stream ends when the fetcher is dropped. Dropping the stream
    /// unsubscribes it.
    pub fn subscribe(&self) -> UnboundedReceiverStream<FetchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        UnboundedReceiverStream::new(rx)
    }

    /// True while any fetch call on this instance is in flight.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The settings in use.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// The underlying message source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn begin(&self) -> FetchingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        FetchingGuard(&self.in_flight)
    }

    /// True when an observer is registered or a stream is still open.
    pub(crate) fn has_listeners(&self) -> bool {
        if !self.observers.is_empty() {
            return true;
        }
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| !tx.is_closed());
        !subscribers.is_empty()
    }

    /// Deliver an event. The event is only built when someone listens.
    pub(crate) fn emit(&self, make: impl FnOnce() -> FetchEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| !tx.is_closed());

        if self.observers.is_empty() && subscribers.is_empty() {
            return;
        }

        let event = make();
        for observer in &self.observers {
            observer.on_event(&event);
        }
        for tx in subscribers.iter() {
            let _ = tx.send(event.clone());
        }
    }

    pub(crate) fn skip(&self, resource: ChannelId, reason: SkipReason) {
        debug!(%resource, %reason, "Skipping resource");
        self.emit(|| FetchEvent::Skipped { resource, reason });
    }

    pub(crate) async fn resolve_channel(&self, channel: ChannelRef) -> ScrollbackResult<ChannelInfo> {
        match channel {
            ChannelRef::Handle(info) => Ok(info),
            ChannelRef::Id(id) => self.source.resolve_channel(id).await,
        }
    }

    pub(crate) async fn resolve_guild(&self, guild: GuildRef) -> ScrollbackResult<GuildInfo> {
        match guild {
            GuildRef::Handle(info) => Ok(info),
            GuildRef::Id(id) => self.source.resolve_guild(id).await,
        }
    }
}

/// Keeps the fetching flag raised; lowers it on drop, including on error.
pub(crate) struct FetchingGuard<'a>(&'a AtomicUsize);

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
