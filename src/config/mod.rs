//! Configuration management.
//!
//! Settings are layered, lowest priority first:
//!
//! 1. built-in defaults, with credentials picked up from `ALADIN_TTB_KEY`,
//!    `KAKAO_REST_API_KEY`, `NAVER_CLIENT_ID` and `NAVER_CLIENT_SECRET`
//! 2. a TOML file (see [`find_config_file`])
//! 3. `BOOK_SEARCH_` prefixed environment variables, with `__` between
//!    sections, e.g. `BOOK_SEARCH_PROVIDERS__KAKAO__TIMEOUT_SECS=5`
//!
//! ```toml
//! [providers.aladin]
//! base_url = "http://www.aladin.co.kr"
//! api_key = "ttb-key"
//! timeout_secs = 10
//!
//! [providers.naver]
//! api_key = "client-id"
//! api_secret = "client-secret"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ALADIN_API_BASE: &str = "http://www.aladin.co.kr";
pub const KAKAO_API_BASE: &str = "https://dapi.kakao.com";
pub const NAVER_API_BASE: &str = "https://openapi.naver.com";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BOOK_SEARCH";

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "book-search.toml";

fn default_timeout_secs() -> u64 {
    10
}

/// A credential that never shows up in `Debug` output or logs
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn from_env(var: &str) -> Self {
        Self(std::env::var(var).unwrap_or_default())
    }

    /// The raw credential, for placing on the wire only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("\"\"")
        } else {
            f.write_str("\"<redacted>\"")
        }
    }
}

/// Static configuration for one provider adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Scheme and host (optionally a path prefix) of the provider API
    pub base_url: String,

    /// Primary credential: Aladin TTB key, Kakao REST key, Naver client id
    #[serde(default)]
    pub api_key: Secret,

    /// Secondary credential, only used by Naver (client secret)
    #[serde(default)]
    pub api_secret: Secret,

    /// Per-call timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Secret::new(api_key),
            api_secret: Secret::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Secret::new(api_secret);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Per-call timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// One configuration block per provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub aladin: ProviderConfig,
    pub kakao: ProviderConfig,
    pub naver: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            aladin: ProviderConfig {
                base_url: ALADIN_API_BASE.to_string(),
                api_key: Secret::from_env("ALADIN_TTB_KEY"),
                api_secret: Secret::default(),
                timeout_secs: default_timeout_secs(),
            },
            kakao: ProviderConfig {
                base_url: KAKAO_API_BASE.to_string(),
                api_key: Secret::from_env("KAKAO_REST_API_KEY"),
                api_secret: Secret::default(),
                timeout_secs: default_timeout_secs(),
            },
            naver: ProviderConfig {
                base_url: NAVER_API_BASE.to_string(),
                api_key: Secret::from_env("NAVER_CLIENT_ID"),
                api_secret: Secret::from_env("NAVER_CLIENT_SECRET"),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// HTTP entry point settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,

    /// `json` for structured output, anything else for human-readable lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Defaults without any credential, suitable for writing to disk
    pub fn template() -> Self {
        let mut config = Self::default();
        for provider in [
            &mut config.providers.aladin,
            &mut config.providers.kakao,
            &mut config.providers.naver,
        ] {
            provider.api_key = Secret::default();
            provider.api_secret = Secret::default();
        }
        config
    }
}

/// Load configuration from defaults, an optional file and the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder =
        config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Look for a configuration file in the working directory, then in the
/// platform config directory (`~/.config/book-search/config.toml` on Linux)
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("book-search").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Write a credential-free template to `path`
pub fn write_template(path: &Path) -> Result<(), ConfigFileError> {
    let content = toml::to_string_pretty(&Config::template())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
