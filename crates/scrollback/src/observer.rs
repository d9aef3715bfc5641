//! Progress reporting through `tracing`.

use scrollback_core::FetchEvent;
use scrollback_interface::FetchObserver;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Observer that logs every fetch event and counts pages.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pages: AtomicUsize,
    messages: AtomicUsize,
    skipped: AtomicUsize,
}

impl TracingObserver {
    /// Create an observer with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page responses seen so far, terminal empty pages included.
    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::Relaxed)
    }

    /// Messages seen across all pages.
    pub fn messages(&self) -> usize {
        self.messages.load(Ordering::Relaxed)
    }

    /// Resources skipped without error.
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}

impl FetchObserver for TracingObserver {
    fn on_event(&self, event: &FetchEvent) {
        match event {
            FetchEvent::Page {
                channel_id, size, ..
            } => {
                self.pages.fetch_add(1, Ordering::Relaxed);
                let total = self.messages.fetch_add(*size, Ordering::Relaxed) + size;
                debug!(event = event.name(), %channel_id, size, total, "Page received");
            }
            FetchEvent::Channel(channel) => {
                info!(event = event.name(), channel = %channel.name, id = %channel.id, "Fetching channel");
            }
            FetchEvent::Thread { thread, parent } => {
                info!(
                    event = event.name(),
                    thread = %thread.name,
                    id = %thread.id,
                    parent = parent.as_ref().map(|p| p.name.as_str()),
                    "Fetching thread"
                );
            }
            FetchEvent::Guild(guild) => {
                info!(event = event.name(), guild = %guild.name, id = %guild.id, "Fetching guild");
            }
            FetchEvent::Skipped { resource, reason } => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                info!(event = event.name(), %resource, %reason, "Skipped");
            }
        }
    }
}
