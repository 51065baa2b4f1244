//! Configuration management for postdesk.
//!
//! Loads configuration from ${POSTDESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_base_url`.
pub const API_BASE_URL_ENV: &str = "POSTDESK_API_BASE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for postdesk configuration and data files.
    //!
    //! POSTDESK_HOME resolution order:
    //! 1. POSTDESK_HOME environment variable (if set)
    //! 2. ~/.config/postdesk (default)

    use std::path::PathBuf;

    /// Returns the postdesk home directory.
    ///
    /// Falls back to a relative `.postdesk` directory when no home
    /// directory can be determined.
    pub fn postdesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("POSTDESK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".postdesk"),
            |h| h.join(".config").join("postdesk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        postdesk_home().join("config.toml")
    }

    /// Returns the path to the persisted session (token + display name).
    pub fn session_path() -> PathBuf {
        postdesk_home().join("session.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        postdesk_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `POSTDESK_LOG` is unset.
    pub level: String,
    /// Whether TUI mode writes logs to `logs/`.
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the blog API.
    pub api_base_url: String,

    /// Per-request timeout in seconds (0 disables).
    pub request_timeout_secs: u64,

    /// Credential exchange endpoint, relative to the base URL.
    pub login_path: String,

    /// Whether the editor supports publish-on-create.
    pub editor_publish_on_create: bool,

    /// Notification lifetime in seconds.
    pub notification_ttl_secs: u64,

    /// Logging configuration.
    pub log: LogConfig,
}

impl Config {
    const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_LOGIN_PATH: &str = "/log-in";
    const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the API base URL with precedence: env > config > default.
    ///
    /// Trailing slashes are stripped so paths can be appended directly.
    ///
    /// # Errors
    /// Returns an error if the chosen URL is not a valid absolute URL.
    pub fn resolve_base_url(&self) -> Result<String> {
        resolve_base_url(
            std::env::var(API_BASE_URL_ENV).ok().as_deref(),
            Some(&self.api_base_url),
            Self::DEFAULT_API_BASE_URL,
        )
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Notification lifetime.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Serializes the Rust defaults as TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn generate() -> Result<String> {
        toml::to_string(&Config::default()).context("Failed to serialize default config to TOML")
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            login_path: Self::DEFAULT_LOGIN_PATH.to_string(),
            editor_publish_on_create: false,
            notification_ttl_secs: Self::DEFAULT_NOTIFICATION_TTL_SECS,
            log: LogConfig::default(),
        }
    }
}

/// Picks the first non-blank candidate (env, then config), else the default.
fn resolve_base_url(
    env_url: Option<&str>,
    config_url: Option<&str>,
    default_url: &str,
) -> Result<String> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(default_url);

    url::Url::parse(chosen).with_context(|| format!("Invalid API base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}
