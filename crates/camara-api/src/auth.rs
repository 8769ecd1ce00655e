use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::Error;

/// Which authentication strategy a client uses.
///
/// Marker enum (no data) -- the actual secrets live in [`Credentials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// OAuth2 access token in `Authorization: Bearer …`.
    Bearer,
    /// Static key in a provider-specific header.
    ApiKey,
    /// No credentials attached (gateway injects them, or tests).
    None,
}

/// Credentials attached to every request as default headers.
///
/// Parameter bundles never carry auth; the client adds it.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Access token obtained from the operator's authorization server.
    Bearer { token: SecretString },

    /// API key sent in `header` (e.g. `x-api-key`).
    ApiKey { header: String, key: SecretString },

    /// Send no auth header.
    None,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::from(token.into()),
        }
    }

    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            key: SecretString::from(key.into()),
        }
    }

    pub fn strategy(&self) -> AuthStrategy {
        match self {
            Self::Bearer { .. } => AuthStrategy::Bearer,
            Self::ApiKey { .. } => AuthStrategy::ApiKey,
            Self::None => AuthStrategy::None,
        }
    }

    /// Render as default headers, marked sensitive so they never show up
    /// in debug output.
    pub fn to_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        match self {
            Self::Bearer { token } => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|e| Error::InvalidHeader {
                        name: AUTHORIZATION.to_string(),
                        message: e.to_string(),
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Self::ApiKey { header, key } => {
                let name = HeaderName::try_from(header.as_str()).map_err(|e| Error::InvalidHeader {
                    name: header.clone(),
                    message: e.to_string(),
                })?;
                let mut value =
                    HeaderValue::from_str(key.expose_secret()).map_err(|e| Error::InvalidHeader {
                        name: header.clone(),
                        message: e.to_string(),
                    })?;
                value.set_sensitive(true);
                headers.insert(name, value);
            }
            Self::None => {}
        }
        Ok(headers)
    }
}
