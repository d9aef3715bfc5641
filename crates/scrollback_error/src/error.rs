//! Top-level error wrapper types.

use crate::{ConfigError, FetchError};

/// Every error condition a Scrollback operation can report.
///
/// # Examples
///
/// ```
/// use scrollback_error::{ConfigError, ScrollbackError};
///
/// let err: ScrollbackError = ConfigError::new("missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScrollbackErrorKind {
    /// Resolution or pagination failure
    #[from(FetchError)]
    Fetch(FetchError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Scrollback error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scrollback_error::{FetchError, FetchErrorKind, ScrollbackResult};
///
/// fn might_fail() -> ScrollbackResult<()> {
///     Err(FetchError::new(FetchErrorKind::Platform("gateway closed".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scrollback Error: {}", _0)]
pub struct ScrollbackError(Box<ScrollbackErrorKind>);

impl ScrollbackError {
    /// Create a new error from a kind.
    pub fn new(kind: ScrollbackErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScrollbackErrorKind {
        &self.0
    }

    /// The wrapped fetch error, if this is one.
    pub fn as_fetch(&self) -> Option<&FetchError> {
        match self.kind() {
            ScrollbackErrorKind::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ScrollbackErrorKind
impl<T> From<T> for ScrollbackError
where
    T: Into<ScrollbackErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scrollback operations.
pub type ScrollbackResult<T> = std::result::Result<T, ScrollbackError>;
