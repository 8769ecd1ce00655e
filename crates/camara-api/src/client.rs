// Async HTTP core shared by every CAMARA service.
//
// Paths are relative to the configured base URL (e.g.
// `https://gateway.example.com/camara/`); auth rides along as default
// headers built from `Credentials`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::request::{self, Operation, Request, X_CORRELATOR};
use crate::transport::{RetryPolicy, TransportConfig};
use crate::model::CheckShape;
use crate::{Credentials, Error, shape};

// ── Error response shape shared by CAMARA APIs ──────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────

/// Async client for a CAMARA gateway.
///
/// Cheap to clone and safe to share between tasks: the underlying
/// `reqwest::Client` is reference counted and nothing else is mutable.
#[derive(Debug, Clone)]
pub struct CamaraClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    auto_correlator: bool,
}

impl CamaraClient {
    // ── Constructors ────────────────────────────────────────────────

    /// Build a client that attaches `credentials` to every request.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(credentials.to_headers()?)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            retry: transport.retry.clone(),
            auto_correlator: transport.auto_correlator,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            retry: RetryPolicy::default(),
            auto_correlator: false,
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_auto_correlator(mut self, enabled: bool) -> Self {
        self.auto_correlator = enabled;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Raw service ─────────────────────────────────────────────────

    /// Run one operation: assemble the bundle, send it, decode the response.
    pub async fn execute<O: Operation>(&self, params: &O) -> Result<O::Response, Error> {
        let request = request::assemble(params)?;
        self.send(&request).await
    }

    /// Send an assembled request, retrying transient failures.
    pub async fn send<T: DeserializeOwned + CheckShape>(
        &self,
        request: &Request,
    ) -> Result<T, Error> {
        let url = self.url(&request.path)?;
        let headers = self.request_headers(request)?;

        let mut attempt = 0;
        loop {
            match self.send_once(request, &url, &headers).await {
                Ok(value) => return shape::decode(value),
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry_delay(&err, attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "{} {url} failed, retrying: {err}",
                        request.method
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(
        &self,
        request: &Request,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<Value, Error> {
        debug!("{} {url}", request.method);

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .headers(headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    fn request_headers(&self, request: &Request) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        if self.auto_correlator && request.header(X_CORRELATOR).is_none() {
            let correlator = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&correlator) {
                headers.insert(X_CORRELATOR, value);
            }
        }

        Ok(headers)
    }

    fn retry_delay(&self, err: &Error, attempt: u32) -> Duration {
        match err {
            Error::RateLimited { retry_after_secs } if *retry_after_secs > 0 => {
                Duration::from_secs(*retry_after_secs).min(self.retry.max_delay)
            }
            _ => self.retry.delay_for_attempt(attempt),
        }
    }

    // ── Response handling ───────────────────────────────────────────

    async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            let preview = body.get(..200).unwrap_or(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            return Error::RateLimited { retry_after_secs };
        }

        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();
        let (message, code) = match parsed {
            Some(err) => (err.message.unwrap_or_else(|| status.to_string()), err.code),
            None if raw.is_empty() => (status.to_string(), None),
            None => (raw, None),
        };

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthenticated { message };
        }

        Error::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}
