//! Configuration for programs that embed `pantry-api`.
//!
//! Settings are layered with figment: serialized defaults, then an
//! optional TOML file the caller names, then `PANTRY_*` environment
//! variables. [`Settings::into_client_config`] resolves credentials and
//! produces a ready-to-use `pantry_api::ClientConfig`.

pub mod logging;

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use pantry_api::auth::DEFAULT_COOKIE_NAME;
use pantry_api::transport::{DEFAULT_USER_AGENT, TlsMode, TransportConfig};
use pantry_api::{ClientConfig, Credentials, QueryFilter, SortOrder};

pub use logging::{LogFormat, LogSettings};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `PANTRY_LOG__FORMAT=json`.
pub const ENV_PREFIX: &str = "PANTRY_";

/// Longest accepted request or connect timeout: one day.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

fn check_timeout(field: &str, secs: u64) -> Result<(), ConfigError> {
    if (1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Ok(());
    }
    Err(ConfigError::Validation {
        field: field.into(),
        reason: format!("must be between 1 and {MAX_TIMEOUT_SECS}, got {secs}"),
    })
}

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Everything a host program needs to build a client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// API root, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Bearer token (plaintext; prefer `token_env`).
    #[serde(skip_serializing, deserialize_with = "conceal")]
    pub token: Option<SecretString>,

    /// Name of an environment variable holding the bearer token.
    pub token_env: Option<String>,

    /// Session cookie value, used when no token is configured.
    #[serde(skip_serializing, deserialize_with = "conceal")]
    pub cookie: Option<SecretString>,

    pub cookie_name: String,

    /// Default per-call deadline.
    pub timeout_secs: u64,

    pub connect_timeout_secs: u64,

    pub max_body_bytes: usize,

    /// Accept invalid TLS certificates (local development only).
    pub insecure: bool,

    /// Path to a PEM CA certificate to trust.
    pub ca_cert: Option<PathBuf>,

    pub user_agent: Option<String>,

    /// Listing page size when a call passes no filter.
    pub default_limit: u16,

    pub default_sort: SortOrder,

    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            token: None,
            token_env: None,
            cookie: None,
            cookie_name: DEFAULT_COOKIE_NAME.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_bytes: pantry_api::response::DEFAULT_MAX_BODY_BYTES,
            insecure: false,
            ca_cert: None,
            user_agent: None,
            default_limit: pantry_api::query::DEFAULT_LIMIT,
            default_sort: SortOrder::Asc,
            log: LogSettings::default(),
        }
    }
}

fn conceal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .map(SecretString::from))
}

// ── Loading ─────────────────────────────────────────────────────────

impl Settings {
    /// The layered figment: defaults, then `file` (if any), then environment.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings. A `file` that was named but does not exist is an error.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = file {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading settings file");
        }
        let settings: Self = Self::figment(file).extract()?;
        Ok(settings)
    }

    /// Render as TOML, e.g. to seed a config file. Secrets are never written.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    // ── Credential resolution ───────────────────────────────────────

    /// Resolve credentials: the variable named by `token_env`, then
    /// `token`, then `cookie`. No credentials is not an error; only
    /// registration and login work without them.
    pub fn resolve_credentials(&self) -> Credentials {
        if let Some(ref env_name) = self.token_env {
            match std::env::var(env_name) {
                Ok(token) if !token.is_empty() => return Credentials::bearer(token),
                _ => debug!(env_name, "token variable unset, falling back"),
            }
        }

        if let Some(ref token) = self.token {
            return Credentials::Bearer(token.clone());
        }

        if let Some(ref cookie) = self.cookie {
            return Credentials::Cookie {
                name: self.cookie_name.clone(),
                value: cookie.clone(),
            };
        }

        Credentials::None
    }

    // ── Translation ─────────────────────────────────────────────────

    fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("{e}: {}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected http or https, got '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    pub fn transport(&self) -> Result<TransportConfig, ConfigError> {
        check_timeout("timeout_secs", self.timeout_secs)?;
        check_timeout("connect_timeout_secs", self.connect_timeout_secs)?;

        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        Ok(TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            cookie_jar: None,
        })
    }

    pub fn default_filter(&self) -> QueryFilter {
        QueryFilter::new()
            .limit(self.default_limit)
            .sort_by(self.default_sort)
    }

    /// Build a `ClientConfig` from these settings.
    pub fn into_client_config(&self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig::new(self.base_url()?)
            .credentials(self.resolve_credentials())
            .transport(self.transport()?)
            .default_filter(self.default_filter())
            .max_body_bytes(self.max_body_bytes))
    }
}
