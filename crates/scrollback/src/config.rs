//! Layered configuration for the fetcher and the CLI.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use scrollback_core::FetcherConfig;
use scrollback_error::{ConfigError, ScrollbackResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../scrollback.toml");

/// Prefix for environment overrides, e.g. `SCROLLBACK_FETCH__PAGE_SIZE`.
const ENV_PREFIX: &str = "SCROLLBACK";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollbackConfig {
    /// Pagination settings
    #[serde(default)]
    pub fetch: FetcherConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "scrollback_fetch=debug")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl ScrollbackConfig {
    /// Load configuration from a specific file, over the bundled defaults.
    ///
    /// Keys missing from the file keep their default values. Environment
    /// overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ScrollbackResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::build(builder).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read configuration from {}: {}",
                path.as_ref().display(),
                e.message
            ))
            .into()
        })
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (scrollback.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/scrollback/scrollback.toml)
    /// 3. User config in current directory (./scrollback.toml)
    /// 4. `SCROLLBACK_<SECTION>__<KEY>` environment variables
    ///
    /// Missing user files are skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scrollback::ScrollbackConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ScrollbackConfig::load()?;
    /// println!("page size: {}", config.fetch.page_size());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> ScrollbackResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scrollback/scrollback.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("scrollback").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(Self::build(builder)?)
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fetch.validate()
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(
            page_size = config.fetch.page_size(),
            include_threads = config.fetch.include_threads(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
