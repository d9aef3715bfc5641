//! Scrollback - walk chat message history.
//!
//! Scrollback pages backwards through the message history of channels and
//! threads and merges the results into a single ordered, de-duplicated
//! [`ResultSet`]. Channels, threads and whole guilds can be fetched one at a
//! time or fanned out sequentially.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scrollback::{ChannelId, Fetcher, SerenityMessageSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SerenityMessageSource::new(std::env::var("DISCORD_TOKEN")?);
//!     let fetcher = Fetcher::new(source);
//!
//!     let messages = fetcher.fetch_channel(ChannelId(1234567890), false).await?;
//!     println!("fetched {} messages", messages.len());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` - Discord message source (default)
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! - `scrollback_error` - Error types
//! - `scrollback_core` - Identifiers, records, selectors, events, config
//! - `scrollback_interface` - `MessageSource` and `FetchObserver` traits
//! - `scrollback_fetch` - The `Fetcher`
//! - `scrollback_discord` - Discord implementation of `MessageSource`
//!
//! This crate re-exports everything and adds configuration loading, logging
//! setup and the `scrollback` binary.

mod config;
mod logging;
mod observer;
pub mod report;

pub use config::{LoggingConfig, ScrollbackConfig};
pub use logging::init_logging;
pub use observer::TracingObserver;

// Re-export core crates (always available)
pub use scrollback_core::*;
pub use scrollback_error::*;
pub use scrollback_fetch::*;
pub use scrollback_interface::*;

// Re-export optional crates based on features
#[cfg(feature = "discord")]
pub use scrollback_discord::*;

#[cfg(feature = "observability")]
pub mod observability;
