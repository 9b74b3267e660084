//! # Console Configuration
//!
//! Operator settings for the console itself. The storefront's own
//! appearance settings live in the settings store, not here.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`console.toml` in the platform config dir, or `--config`)
//! 3. Environment variables (`KALA_*`)
//!
//! ## Example console.toml
//! ```toml
//! database_path = "/srv/drik-kala/drik-kala.db"
//! low_stock_threshold = 5
//! whatsapp_number = "919479988471"
//! log_filter = "info,kala=debug,sqlx=warn"
//! ```

use directories::ProjectDirs;
use kala_core::order::whatsapp_digits;
use kala_core::DEFAULT_LOW_STOCK_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default tracing filter when neither `RUST_LOG` nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,kala=debug,sqlx=warn";

const DATABASE_FILE: &str = "drik-kala.db";
const CONFIG_FILE: &str = "console.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read, or a directory could not be created.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`ConsoleConfig`].
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No platform data directory (e.g. no home directory).
    #[error("Could not determine app data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// ConsoleConfig
// =============================================================================

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Database file. `None` uses the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Stock below this is flagged low.
    pub low_stock_threshold: i64,

    /// Order link destination (digits only). `None` derives it from the
    /// storefront's WhatsApp number setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,

    /// tracing filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            database_path: None,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            whatsapp_number: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default config file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config, falling back to defaults when the file is broken.
    ///
    /// The load error is handed back rather than logged, since tracing is
    /// configured from the result.
    pub fn load_or_default(config_path: Option<PathBuf>) -> (Self, Option<ConfigError>) {
        match Self::load(config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading console config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "low_stock_threshold must not be negative, got {}",
                self.low_stock_threshold
            )));
        }

        if let Some(number) = &self.whatsapp_number {
            if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::Invalid(format!(
                    "whatsapp_number must be digits only (country code first), got '{}'",
                    number
                )));
            }
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `KALA_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable lookup (the environment in
    /// production, a map in tests).
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("KALA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(threshold) = lookup("KALA_LOW_STOCK_THRESHOLD") {
            match threshold.trim().parse::<i64>() {
                Ok(t) => self.low_stock_threshold = t,
                Err(_) => {
                    warn!(value = %threshold, "Ignoring non-numeric KALA_LOW_STOCK_THRESHOLD")
                }
            }
        }

        if let Some(number) = lookup("KALA_WHATSAPP_NUMBER") {
            self.whatsapp_number = Some(whatsapp_digits(&number));
        }

        if let Some(filter) = lookup("KALA_LOG") {
            self.log_filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Determines the database file path.
    ///
    /// ## Resolution Order
    /// 1. `cli_override` (`--db`)
    /// 2. `database_path` from file / `KALA_DB_PATH`
    /// 3. Platform data directory:
    ///    - **macOS**: `~/Library/Application Support/com.drikkala.drik-kala/drik-kala.db`
    ///    - **Windows**: `%APPDATA%\drikkala\drik-kala\data\drik-kala.db`
    ///    - **Linux**: `~/.local/share/drik-kala/drik-kala.db`
    ///
    /// The parent directory is created if missing.
    pub fn resolve_database_path(&self, cli_override: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = match cli_override.or_else(|| self.database_path.clone()) {
            Some(path) => path,
            None => project_dirs()
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .join(DATABASE_FILE),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(path)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "drikkala", "drik-kala")
}

// =============================================================================
// Unit Tests
// =============================================================================
