//! Shared configuration for the gtasks binaries.
//!
//! Discovery checks two locations in precedence order:
//! 1. `./gtasks.toml` (project-local)
//! 2. `~/.config/gtasks.toml` (user-global)
//!
//! `GTASKS_*` environment variables override individual file values.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, ClientResult};

const CONFIG_FILENAME: &str = "gtasks.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";

pub const DEFAULT_TASKS_BASE_URL: &str = "https://tasks.googleapis.com/tasks/v1";
pub const DEFAULT_GMAIL_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Top-level configuration shared by the server, MCP bridge, and CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GtasksConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// REST server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the REST API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Per-request timeout in seconds applied by the HTTP middleware.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Google API settings. Base URL overrides exist for tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Path to an authorized-user credentials JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,
    #[serde(default = "default_tasks_base_url")]
    pub tasks_base_url: String,
    #[serde(default = "default_gmail_base_url")]
    pub gmail_base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            tasks_base_url: default_tasks_base_url(),
            gmail_base_url: default_gmail_base_url(),
            token_url: default_token_url(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_tasks_base_url() -> String {
    DEFAULT_TASKS_BASE_URL.to_string()
}

fn default_gmail_base_url() -> String {
    DEFAULT_GMAIL_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl GtasksConfig {
    /// Load config from the first discovered location, then apply
    /// environment overrides. Missing files yield defaults.
    pub fn load() -> Self {
        let mut config = if let Some(path) = find_config_file() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(?path, "Loaded config");
                        config
                    }
                    Err(e) => {
                        tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config
    }

    /// Parse a config from TOML text and apply environment overrides.
    pub fn from_toml(contents: &str) -> ClientResult<Self> {
        let mut config: Self = toml::from_str(contents)
            .map_err(|e| ClientError::config_error(format!("Invalid config: {e}")))?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var("GTASKS_BIND") {
            self.server.bind = bind;
        }
        if let Ok(path) = std::env::var("GTASKS_CREDENTIALS") {
            self.google.credentials_path = Some(path);
        }
        if let Ok(url) = std::env::var("GTASKS_TASKS_BASE_URL") {
            self.google.tasks_base_url = url;
        }
        if let Ok(url) = std::env::var("GTASKS_GMAIL_BASE_URL") {
            self.google.gmail_base_url = url;
        }
        if let Ok(url) = std::env::var("GTASKS_TOKEN_URL") {
            self.google.token_url = url;
        }
    }

    /// Resolved credentials path, falling back to the conventional location
    /// under the user's config directory.
    pub fn credentials_path(&self) -> ClientResult<PathBuf> {
        if let Some(path) = &self.google.credentials_path {
            return Ok(expand_path(path));
        }
        home_dir()
            .map(|home| home.join(GLOBAL_CONFIG_DIR).join("gtasks").join("credentials.json"))
            .ok_or_else(|| {
                ClientError::config_error(
                    "No credentials path configured and HOME is not set",
                )
            })
    }
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    // 1. Project-local: ./gtasks.toml
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    // 2. User-global: ~/.config/gtasks.toml
    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand a path, resolving `~` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
