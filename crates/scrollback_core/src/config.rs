//! Fetcher tuning.

use derive_builder::Builder;
use derive_getters::Getters;
use scrollback_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest page the history endpoint accepts.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Fetcher settings.
///
/// # Examples
///
/// ```
/// use scrollback_core::FetcherConfigBuilder;
///
/// let config = FetcherConfigBuilder::default()
///     .page_size(50)
///     .build()
///     .unwrap();
/// assert_eq!(*config.page_size(), 50);
/// assert!(!*config.include_threads());
///
/// assert!(FetcherConfigBuilder::default().page_size(0).build().is_err());
/// ```
///
/// Every way of building one checks the page size, deserialization included:
///
/// ```
/// use scrollback_core::FetcherConfig;
///
/// assert!(serde_json::from_str::<FetcherConfig>(r#"{"page_size": 0}"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
#[serde(try_from = "RawFetcherConfig")]
pub struct FetcherConfig {
    /// Messages requested per page (1..=100, default 100).
    page_size: u8,

    /// Default for whether channel fetches descend into active threads.
    include_threads: bool,
}

/// Unchecked wire form of [`FetcherConfig`].
#[derive(Deserialize)]
struct RawFetcherConfig {
    #[serde(default = "default_page_size")]
    page_size: u8,
    #[serde(default)]
    include_threads: bool,
}

impl TryFrom<RawFetcherConfig> for FetcherConfig {
    type Error = ConfigError;

    fn try_from(raw: RawFetcherConfig) -> Result<Self, Self::Error> {
        let config = Self {
            page_size: raw.page_size,
            include_threads: raw.include_threads,
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_page_size() -> u8 {
    MAX_PAGE_SIZE
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            include_threads: false,
        }
    }
}

impl FetcherConfig {
    /// Check the page size is one the platform accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is 0 or above [`MAX_PAGE_SIZE`].
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_page_size(self.page_size).map_err(ConfigError::new)
    }
}

impl FetcherConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.page_size {
            Some(size) => check_page_size(size),
            None => Ok(()),
        }
    }
}

fn check_page_size(size: u8) -> Result<(), String> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(format!(
            "page_size must be in 1..={}, got {}",
            MAX_PAGE_SIZE, size
        ));
    }
    Ok(())
}
