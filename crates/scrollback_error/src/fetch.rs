//! Errors raised while resolving resources or paging through message history.

/// The kind of platform resource an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ResourceKind {
    /// A guild (server).
    #[display("guild")]
    Guild,
    /// A text-bearing channel.
    #[display("channel")]
    Channel,
    /// A thread attached to a channel.
    #[display("thread")]
    Thread,
    /// A guild member (used for permission lookups).
    #[display("member")]
    Member,
}

/// Specific fetch error conditions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// The identifier does not resolve to an accessible resource.
    #[display("{} not found: {}", resource, id)]
    NotFound {
        /// What was being resolved
        resource: ResourceKind,
        /// The snowflake that failed to resolve
        id: u64,
    },

    /// The caller supplied an incomplete or contradictory request.
    #[display("Misuse: {}", _0)]
    Misuse(String),

    /// The underlying platform SDK reported a failure.
    #[display("Platform error: {}", _0)]
    Platform(String),
}

/// Fetch error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    kind: FetchErrorKind,
    line: u32,
    file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use scrollback_error::{FetchError, FetchErrorKind};
    ///
    /// let err = FetchError::new(FetchErrorKind::Misuse("parent channel required".into()));
    /// assert!(err.is_misuse());
    /// ```
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`FetchErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(resource: ResourceKind, id: u64) -> Self {
        Self::new(FetchErrorKind::NotFound { resource, id })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }

    /// Line number where the error was created.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source file where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// True when the error reports an unresolvable resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, FetchErrorKind::NotFound { .. })
    }

    /// True when the error reports caller misuse.
    pub fn is_misuse(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Misuse(_))
    }
}
