//! Configuration management for pinecheck.
//!
//! Values come from (highest priority first) process environment
//! variables, a `.env` file merged into the environment at startup, an
//! optional TOML file, and built-in defaults. Presence of the API key and
//! index name is not checked here; callers ask for them through
//! [`Config::require_api_key`] and [`Config::require_index_name`] at the
//! point of use.

use crate::core::error::{ProbeError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "PINECONE_API_KEY";

/// Environment variable holding the target index name
pub const INDEX_ENV: &str = "PINECONE_INDEX";

/// Default `.env` file looked up in the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pinecone: PineconeConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

/// Service connection settings
#[derive(Clone, Deserialize, Serialize)]
pub struct PineconeConfig {
    /// API key (secret, never serialized or logged)
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Control-plane base URL
    #[serde(default = "default_controller_host")]
    pub controller_host: String,

    /// Data-plane host; skips index resolution when set
    #[serde(default)]
    pub index_host: Option<String>,

    /// Value sent as `X-Pinecone-API-Version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds (unset = HTTP client default)
    #[serde(default)]
    pub timeout_sec: Option<u64>,
}

/// Probe target settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Name of the index to check
    #[serde(default)]
    pub index_name: String,

    /// When the index name is turned into a data-plane host
    #[serde(default)]
    pub resolve: ResolveMode,
}

/// Index resolution strategy
///
/// `Eager` asks the control plane for the index as soon as a handle is
/// requested, so a missing index fails before anything is printed.
/// `Lazy` defers the lookup to the first statistics query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    #[default]
    Eager,
    Lazy,
}

impl FromStr for ResolveMode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(ResolveMode::Eager),
            "lazy" => Ok(ResolveMode::Lazy),
            other => Err(ProbeError::ConfigError(format!(
                "Unknown resolve mode '{other}' (expected 'eager' or 'lazy')"
            ))),
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::Eager => write!(f, "eager"),
            ResolveMode::Lazy => write!(f, "lazy"),
        }
    }
}

fn default_controller_host() -> String {
    "https://api.pinecone.io".to_string()
}

fn default_api_version() -> String {
    "2024-07".to_string()
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            controller_host: default_controller_host(),
            index_host: None,
            api_version: default_api_version(),
            timeout_sec: None,
        }
    }
}

impl fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &redact_key(&self.api_key))
            .field("controller_host", &self.controller_host)
            .field("index_host", &self.index_host)
            .field("api_version", &self.api_version)
            .field("timeout_sec", &self.timeout_sec)
            .finish()
    }
}

/// Mask an API key for display, keeping only the last four characters
pub fn redact_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        "<unset>".to_string()
    } else if count <= 8 {
        "****".to_string()
    } else {
        let tail: String = key.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}

/// Merge a `.env` file into the process environment
///
/// Variables already present in the environment are left untouched.
/// When `required` is set (the user named the file explicitly) a missing
/// file or an unparseable line is a `ConfigError`. Otherwise bad lines
/// are skipped with a warning and the rest of the file still loads.
/// Returns the path that was loaded, if any.
pub fn load_env_file(path: &Path, required: bool) -> Result<Option<PathBuf>> {
    if !path.exists() {
        if required {
            return Err(ProbeError::ConfigError(format!(
                "Env file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("No env file at {}", path.display());
        return Ok(None);
    }

    let load_error =
        |e: dotenv::Error| ProbeError::ConfigError(format!("Failed to load {}: {e}", path.display()));

    if required {
        dotenv::from_path(path).map_err(load_error)?;
    } else {
        for item in dotenv::from_path_iter(path).map_err(load_error)? {
            match item {
                Ok((key, value)) => {
                    if env::var_os(&key).is_none() {
                        env::set_var(key, value);
                    }
                }
                Err(e) => tracing::warn!("Skipping line in {}: {e}", path.display()),
            }
        }
    }
    tracing::debug!("Loaded env file {}", path.display());

    Ok(Some(path.to_path_buf()))
}

impl Config {
    /// Build a configuration from explicit values, other settings default
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            pinecone: PineconeConfig {
                api_key: api_key.into(),
                ..PineconeConfig::default()
            },
            probe: ProbeConfig {
                index_name: index_name.into(),
                ..ProbeConfig::default()
            },
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ProbeError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// The `.env` file must already be merged into the environment
    /// (see [`load_env_file`]).
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let config_file = xdg.config_file();
        let mut config = if config_file.exists() {
            tracing::debug!("Reading config file {}", config_file.display());
            Self::from_file(config_file)?
        } else {
            Self::default()
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(key) = env::var(API_KEY_ENV) {
            self.pinecone.api_key = key;
        }
        if let Ok(index) = env::var(INDEX_ENV) {
            self.probe.index_name = index;
        }
        if let Ok(host) = env::var("PINECONE_CONTROLLER_HOST") {
            if !host.is_empty() {
                self.pinecone.controller_host = host;
            }
        }
        if let Ok(host) = env::var("PINECONE_INDEX_HOST") {
            self.pinecone.index_host = if host.is_empty() { None } else { Some(host) };
        }
        if let Ok(version) = env::var("PINECONE_API_VERSION") {
            if !version.is_empty() {
                self.pinecone.api_version = version;
            }
        }
        if let Ok(timeout) = env::var("PINECONE_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.pinecone.timeout_sec = Some(t);
            }
        }
        if let Ok(mode) = env::var("PINECONE_RESOLVE") {
            self.probe.resolve = mode.parse()?;
        }

        Ok(())
    }

    /// Validate ambient settings
    ///
    /// The API key and index name are deliberately not checked here.
    pub fn validate(&self) -> Result<()> {
        if self.pinecone.controller_host.trim().is_empty() {
            return Err(ProbeError::ConfigError(
                "Controller host must not be empty".to_string(),
            ));
        }

        if !has_http_scheme(&self.pinecone.controller_host) {
            return Err(ProbeError::ConfigError(format!(
                "Controller host '{}' must start with http:// or https://",
                self.pinecone.controller_host
            )));
        }

        if let Some(host) = &self.pinecone.index_host {
            if host.trim().is_empty() {
                return Err(ProbeError::ConfigError(
                    "Index host must not be empty (leave it unset to resolve by name)"
                        .to_string(),
                ));
            }
        }

        if self.pinecone.timeout_sec == Some(0) {
            return Err(ProbeError::ConfigError(
                "Timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// API key, or `ConfigurationMissing` when it is empty
    pub fn require_api_key(&self) -> Result<&str> {
        require(&self.pinecone.api_key, API_KEY_ENV)
    }

    /// Index name, or `ConfigurationMissing` when it is empty
    pub fn require_index_name(&self) -> Result<&str> {
        require(&self.probe.index_name, INDEX_ENV)
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  API key: {}", redact_key(&self.pinecone.api_key));
        tracing::debug!("  Index: {}", self.probe.index_name);
        tracing::debug!("  Controller: {}", self.pinecone.controller_host);
        if let Some(host) = &self.pinecone.index_host {
            tracing::debug!("  Index host: {}", host);
        }
        tracing::debug!("  API version: {}", self.pinecone.api_version);
        match self.pinecone.timeout_sec {
            Some(t) => tracing::debug!("  Timeout: {}s", t),
            None => tracing::debug!("  Timeout: client default"),
        }
        tracing::debug!("  Resolve: {}", self.probe.resolve);
    }
}

fn has_http_scheme(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(ProbeError::ConfigurationMissing(format!(
            "{name} is not set or empty"
        )))
    } else {
        Ok(value)
    }
}
