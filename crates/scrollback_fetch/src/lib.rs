//! Paginated message fetching for Scrollback.
//!
//! [`Fetcher`] pages through a channel's or thread's history until the
//! platform returns an empty page, and fans that loop out over channel
//! lists, guilds, every known guild, and thread selections. All fan-out is
//! sequential: one resource is drained before the next one is touched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scrollback_fetch::Fetcher;
//! use scrollback_core::{FetchEvent, GuildId};
//!
//! let fetcher = Fetcher::new(source).with_observer(|event: &FetchEvent| {
//!     if let FetchEvent::Page { size, .. } = event {
//!         println!("got {size} messages");
//!     }
//! });
//!
//! let messages = fetcher.fetch_guild(GuildId(1234), false).await?;
//! ```
//!
//! # Failure semantics
//!
//! The named operations are all-or-nothing: the first error aborts the
//! whole call and discards what was gathered. [`Fetcher::fetch_batch`]
//! keeps what was gathered before the failure instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod fetcher;
mod page;

pub use aggregate::BatchOutcome;
pub use fetcher::Fetcher;
