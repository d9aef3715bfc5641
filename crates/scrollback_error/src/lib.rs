//! Error types for the Scrollback library.
//!
//! This crate provides the error types shared by every Scrollback crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scrollback_error::{FetchError, FetchErrorKind, ResourceKind, ScrollbackResult};
//!
//! fn lookup() -> ScrollbackResult<String> {
//!     Err(FetchError::new(FetchErrorKind::NotFound {
//!         resource: ResourceKind::Channel,
//!         id: 42,
//!     }))?
//! }
//!
//! match lookup() {
//!     Ok(name) => println!("Got: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fetch;

pub use config::ConfigError;
pub use error::{ScrollbackError, ScrollbackErrorKind, ScrollbackResult};
pub use fetch::{FetchError, FetchErrorKind, ResourceKind};
