//! Configuration for CAMARA tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to the connection settings `camara-api` needs. The CLI adds
//! flag-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use camara_api::{CamaraClient, Credentials, RetryPolicy, TlsMode, TransportConfig};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Keyring service name; entries are keyed `<profile>/token`.
pub const KEYRING_SERVICE: &str = "camara";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CAMARA_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is given on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Explicit name, else `default_profile`, else `"default"`.
    pub fn profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            ConfigError::UnknownProfile {
                name: name.into(),
                available: if names.is_empty() {
                    "none".into()
                } else {
                    names.join(", ")
                },
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub max_retries: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_output() -> String {
    "json".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named gateway profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Gateway base URL; API paths are appended (e.g. "https://api.example.com/camara").
    pub base_url: String,

    /// Auth mode: "bearer", "api-key", or "none".
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// Access token or API key (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token or key.
    pub token_env: Option<String>,

    /// Header carrying the key in "api-key" mode.
    pub api_key_header: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid certificates (sandbox gateways only).
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Override retry count for transient failures.
    pub max_retries: Option<u32>,

    /// Generate an `x-correlator` for requests that don't carry one.
    pub auto_correlator: Option<bool>,
}

impl Profile {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_mode: default_auth_mode(),
            token: None,
            token_env: None,
            api_key_header: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            max_retries: None,
            auto_correlator: None,
        }
    }
}

fn default_auth_mode() -> String {
    "bearer".into()
}

const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$CAMARA_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("org", "camara", "camara").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("camara");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Layer defaults, the TOML file at `path` (if present) and `CAMARA_*`
/// environment variables. Nested keys use `__`, e.g.
/// `CAMARA_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CAMARA_").ignore(&["CONFIG"]).split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

fn keyring_lookup(profile_name: &str) -> Option<String> {
    keyring_entry(profile_name).ok()?.get_password().ok()
}

/// Store a token or key in the OS keyring for `profile_name`.
pub fn store_secret(profile_name: &str, secret: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(secret.expose_secret())
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Resolve a profile's secret: `token_env` variable, then keyring, then
/// plaintext `token`.
pub fn resolve_secret(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_secret_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        keyring_lookup,
    )
}

/// [`resolve_secret`] with injectable environment and keyring lookups.
pub fn resolve_secret_with(
    profile: &Profile,
    profile_name: &str,
    from_env: impl Fn(&str) -> Option<String>,
    from_keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Some(val) = from_env(env_name) {
            debug!(profile = profile_name, source = "env", "resolved credentials");
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Some(secret) = from_keyring(profile_name) {
        debug!(profile = profile_name, source = "keyring", "resolved credentials");
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        debug!(profile = profile_name, source = "config", "resolved credentials");
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Turn a profile's `auth_mode` plus a resolved secret into `Credentials`.
pub fn credentials_for(
    profile: &Profile,
    secret: Option<SecretString>,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let require = |secret: Option<SecretString>| {
        secret.ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
    };

    match profile.auth_mode.as_str() {
        "bearer" => Ok(Credentials::Bearer {
            token: require(secret)?,
        }),
        "api-key" => Ok(Credentials::ApiKey {
            header: profile
                .api_key_header
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.into()),
            key: require(secret)?,
        }),
        "none" => Ok(Credentials::None),
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'bearer', 'api-key', or 'none', got '{other}'"),
        }),
    }
}

/// Resolve `Credentials` from a profile via the full credential chain.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    let secret = if profile.auth_mode == "none" {
        None
    } else {
        Some(resolve_secret(profile, profile_name)?)
    };
    credentials_for(profile, secret, profile_name)
}

// ── Connection settings ─────────────────────────────────────────────

/// Everything needed to build a [`CamaraClient`].
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl ConnectionSettings {
    pub fn connect(&self) -> Result<CamaraClient, camara_api::Error> {
        CamaraClient::new(self.base_url.as_str(), &self.credentials, &self.transport)
    }
}

/// Parse and validate a base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Transport settings from a profile, falling back to global defaults.
pub fn transport_for(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig::default()
        .with_tls(tls)
        .with_timeout(Duration::from_secs(
            profile.timeout.unwrap_or(defaults.timeout),
        ))
        .with_retry(RetryPolicy::new(
            profile.max_retries.unwrap_or(defaults.max_retries),
        ))
        .with_auto_correlator(profile.auto_correlator.unwrap_or(false))
}

/// Build `ConnectionSettings` from a profile, with no CLI flag overrides.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ConnectionSettings, ConfigError> {
    Ok(ConnectionSettings {
        base_url: parse_base_url(&profile.base_url)?,
        credentials: resolve_auth(profile, profile_name)?,
        transport: transport_for(profile, defaults),
    })
}
