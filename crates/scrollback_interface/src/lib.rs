//! Trait definitions for the Scrollback message history fetcher.
//!
//! Two seams separate the fetcher from the outside world:
//! - [`MessageSource`] is what the fetcher consumes: the handful of platform
//!   SDK calls needed to resolve resources and list message pages.
//! - [`FetchObserver`] is what the fetcher produces: progress notifications
//!   for callers that would rather watch than wait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observer;
mod source;

pub use observer::FetchObserver;
pub use source::MessageSource;
