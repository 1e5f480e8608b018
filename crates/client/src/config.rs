//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `QUEUEMATE_API_BASE_URL` - Backend base URL (e.g., `https://api.queuely.app`)
//!
//! ## Optional
//! - `QUEUEMATE_STATE_DIR` - Directory for the persisted session (default: platform data dir)
//! - `QUEUEMATE_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `QUEUEMATE_POLL_INTERVAL_SECS` - Dashboard queue refresh period (default: 8)
//! - `QUEUEMATE_PUBLIC_LINK_HOST` - Host shown in the public queue link (default: queuely.app)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 8;
const DEFAULT_PUBLIC_LINK_HOST: &str = "queuely.app";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No state directory available; set QUEUEMATE_STATE_DIR")]
    NoStateDir,
}

/// QueueMate client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; every endpoint path is joined onto it
    pub api_base_url: Url,
    /// Directory holding the persisted session file
    pub state_dir: PathBuf,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Period of the dashboard queue refresh
    pub poll_interval: Duration,
    /// Host used when rendering the public queue link
    pub public_link_host: String,
}

impl ClientConfig {
    /// Configuration with defaults for everything except the base URL and
    /// state directory.
    #[must_use]
    pub fn new(api_base_url: Url, state_dir: PathBuf) -> Self {
        Self {
            api_base_url,
            state_dir,
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            public_link_host: DEFAULT_PUBLIC_LINK_HOST.to_owned(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or any value fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_required_env("QUEUEMATE_API_BASE_URL")?)?;

        let state_dir = match get_optional_env("QUEUEMATE_STATE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_state_dir().ok_or(ConfigError::NoStateDir)?,
        };

        let request_timeout = Duration::from_secs(get_secs_or_default(
            "QUEUEMATE_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let poll_interval = Duration::from_secs(get_secs_or_default(
            "QUEUEMATE_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let public_link_host =
            get_env_or_default("QUEUEMATE_PUBLIC_LINK_HOST", DEFAULT_PUBLIC_LINK_HOST);

        Ok(Self {
            api_base_url,
            state_dir,
            request_timeout,
            poll_interval,
            public_link_host,
        })
    }

    /// Path of the persisted session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

/// Parse and normalize the base URL so relative joins keep its path.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| {
        ConfigError::InvalidEnvVar("QUEUEMATE_API_BASE_URL".to_string(), e.to_string())
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "QUEUEMATE_API_BASE_URL".to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }

    if url.scheme() != "https" {
        tracing::warn!(url = %url, "QUEUEMATE_API_BASE_URL is not HTTPS; credentials will be sent in clear text");
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn default_state_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("app", "queuely", "queuemate")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a positive number of seconds, or the default when unset.
fn get_secs_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
