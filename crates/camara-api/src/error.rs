use thiserror::Error;

/// Top-level error type for the `camara-api` crate.
///
/// Splits into two families. Local input errors (`MissingRequiredField`,
/// `InvalidValue`, `TypeMismatch`, `InvalidHeader`) mean the caller built a
/// bad request or the payload did not fit the model; fix the input and try
/// again. Remote errors (`Api`, `Unauthenticated`, `RateLimited`,
/// `Transport`, `Deserialization`) come back from the network or the
/// provider and may be worth retrying with back-off.
#[derive(Debug, Error)]
pub enum Error {
    // ── Data binding ────────────────────────────────────────────────
    /// A required model field was never assigned.
    #[error("{model}: missing required field `{field}`")]
    MissingRequiredField {
        model: &'static str,
        field: String,
    },

    /// A string did not match any member of a closed enum.
    #[error("invalid {kind} value `{value}` (expected one of: {})", .allowed.join(", "))]
    InvalidValue {
        kind: &'static str,
        value: String,
        allowed: Vec<String>,
    },

    /// A field was given a shape incompatible with its target type.
    #[error("{model}: {message}")]
    TypeMismatch {
        model: &'static str,
        message: String,
    },

    /// A header field could not be encoded as an HTTP header.
    #[error("invalid header `{name}`: {message}")]
    InvalidHeader { name: String, message: String },

    // ── Remote ──────────────────────────────────────────────────────
    /// Structured error returned by a CAMARA endpoint
    /// (`{"status": …, "code": …, "message": …}`).
    #[error("CAMARA API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The access token or API key was rejected (HTTP 401).
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// Rate limited by the provider. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body was not valid JSON.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Configuration ───────────────────────────────────────────────
    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` for errors caused by local input: fix the request
    /// rather than retrying it.
    pub fn is_local_input(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. }
                | Self::InvalidValue { .. }
                | Self::TypeMismatch { .. }
                | Self::InvalidHeader { .. }
        )
    }

    /// Returns `true` for failures reported by the network or the provider.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::Unauthenticated { .. }
                | Self::RateLimited { .. }
                | Self::Transport(_)
                | Self::Deserialization { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the CAMARA error code (e.g. `INVALID_ARGUMENT`), if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_remote_are_disjoint() {
        let missing = Error::MissingRequiredField {
            model: "Subscription",
            field: "sink".into(),
        };
        assert!(missing.is_local_input());
        assert!(!missing.is_remote());

        let api = Error::Api {
            status: 404,
            code: Some("NOT_FOUND".into()),
            message: "session not found".into(),
        };
        assert!(api.is_remote());
        assert!(!api.is_local_input());
        assert!(api.is_not_found());
        assert_eq!(api.api_error_code(), Some("NOT_FOUND"));
    }

    #[test]
    fn gateway_errors_are_transient() {
        let unavailable = Error::Api {
            status: 503,
            code: None,
            message: "Service Unavailable".into(),
        };
        assert!(unavailable.is_transient());

        let conflict = Error::Api {
            status: 409,
            code: Some("CONFLICT".into()),
            message: "session exists".into(),
        };
        assert!(!conflict.is_transient());
    }

    #[test]
    fn invalid_value_lists_allowed_members() {
        let err = Error::InvalidValue {
            kind: "SubscriptionStatus",
            value: "BOGUS".into(),
            allowed: vec!["ACTIVE".into(), "INACTIVE".into()],
        };
        assert_eq!(
            err.to_string(),
            "invalid SubscriptionStatus value `BOGUS` (expected one of: ACTIVE, INACTIVE)"
        );
    }
}
