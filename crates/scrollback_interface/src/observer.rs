//! Progress observers.

use scrollback_core::FetchEvent;

/// Receives [`FetchEvent`]s as a fetch progresses.
///
/// Called synchronously from the fetching task, so implementations should
/// return quickly. Closures taking `&FetchEvent` implement this trait.
///
/// # Example
///
/// ```
/// use scrollback_core::FetchEvent;
/// use scrollback_interface::FetchObserver;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let pages = AtomicUsize::new(0);
/// let observer = |event: &FetchEvent| {
///     if let FetchEvent::Page { .. } = event {
///         pages.fetch_add(1, Ordering::Relaxed);
///     }
/// };
/// observer.on_event(&FetchEvent::Page {
///     channel_id: 1.into(),
///     size: 0,
///     messages: vec![],
/// });
/// assert_eq!(pages.load(Ordering::Relaxed), 1);
/// ```
pub trait FetchObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &FetchEvent);
}

impl<F> FetchObserver for F
where
    F: Fn(&FetchEvent) + Send + Sync,
{
    fn on_event(&self, event: &FetchEvent) {
        self(event)
    }
}
