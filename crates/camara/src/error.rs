//! CLI error types with miette diagnostics.
//!
//! Maps `camara_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use camara_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REMOTE: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API: {message}")]
    #[diagnostic(
        code(camara::connection_failed),
        help(
            "Check the base URL and your network connection.\n\
             Increase the timeout with --timeout or retry with --retries."
        )
    )]
    ConnectionFailed { message: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(camara::tls_error),
        help("Configure ca_cert in your profile, or use --insecure (-k) for testing only.")
    )]
    Tls { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(camara::auth_failed),
        help(
            "The access token was rejected or has expired.\n\
             Run: camara config set-token --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(camara::no_credentials),
        help(
            "Store a token with: camara config set-token --profile {profile}\n\
             Or pass --token / set CAMARA_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(camara::not_found))]
    NotFound { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(camara::api_error))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Rate limited by the provider")]
    #[diagnostic(
        code(camara::rate_limited),
        help("Retry after {retry_after_secs}s, or pass --retries to wait automatically.")
    )]
    RateLimited { retry_after_secs: u64 },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(camara::bad_response), help("Run with -vv to see the request."))]
    BadResponse { message: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid input: {message}")]
    #[diagnostic(code(camara::invalid_input))]
    InvalidInput { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(camara::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(camara::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: camara config init --name {name} --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API base URL configured")]
    #[diagnostic(
        code(camara::no_config),
        help(
            "Create a profile with: camara config init --url <URL>\n\
             Or pass --base-url. Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(camara::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(camara::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api { .. } | Self::RateLimited { .. } | Self::BadResponse { .. } => {
                exit_code::REMOTE
            }
            Self::InvalidInput { .. } | Self::Validation { .. } | Self::Json(_) => {
                exit_code::USAGE
            }
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Io(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── camara_api::Error → CliError mapping ─────────────────────────────

impl From<camara_api::Error> for CliError {
    fn from(err: camara_api::Error) -> Self {
        use camara_api::Error;

        if err.is_not_found() {
            return Self::NotFound {
                message: err.to_string(),
            };
        }

        match err {
            Error::Unauthenticated { message } => Self::AuthFailed { message },

            Error::Api {
                status: 403,
                code,
                message,
            } => Self::AuthFailed {
                message: code.map_or_else(|| message.clone(), |c| format!("{c}: {message}")),
            },

            Error::Api {
                status,
                code,
                message,
            } => Self::Api {
                status,
                code,
                message,
            },

            Error::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },

            Error::Transport(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },

            Error::Tls(message) => Self::Tls { message },

            Error::Deserialization { message, .. } => Self::BadResponse { message },

            Error::InvalidUrl(e) => Self::Validation {
                field: "base-url".into(),
                reason: e.to_string(),
            },

            local @ (Error::MissingRequiredField { .. }
            | Error::InvalidValue { .. }
            | Error::TypeMismatch { .. }
            | Error::InvalidHeader { .. }) => Self::InvalidInput {
                message: local.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
