//! Discord message source for scrollback.
//!
//! [`SerenityMessageSource`] implements [`scrollback_interface::MessageSource`]
//! over serenity's REST client. It needs only a bot token; no gateway
//! connection is opened.

#![warn(missing_docs)]

mod conversions;
mod error;
mod source;

pub use conversions::channel_kind;
pub use source::SerenityMessageSource;
