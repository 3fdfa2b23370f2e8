//! Authenticated HTTP facade for the AppCenter API.
//!
//! # Architecture
//!
//! Everything hangs off a constructible [`Client`] (no process-wide
//! singleton), built from a server origin plus injectable token path and
//! settings TTL:
//!
//! - [`Client::request`] - the request helper: bearer injection, JSON vs.
//!   raw normalization, the 401 / `detail` / generic error taxonomy
//! - [`token::TokenStore`] - one credential file under the data directory
//! - [`settings`] - TTL'd single-flight cache for the `ui_timezone` override
//! - [`guard`] - token-presence page guard
//! - [`Client::login`] / [`Client::logout`] - credential lifecycle
//!
//! Date rendering lives in `appcenter-utils`; [`Client::format_timestamp`]
//! ties it to the resolved UI timezone.
//!
//! # Error Handling
//!
//! Request errors are returned, not displayed; page code decides how to
//! surface them (typically a toast). The one local recovery is
//! [`Client::init_ui`], which logs and swallows settings-refresh failures
//! because the timezone override is a non-critical enhancement.

pub mod error;
pub mod guard;
pub mod settings;
pub mod token;

use std::path::PathBuf;
use std::time::Duration;

use appcenter_types::{LoginRequest, TokenResponse};
use appcenter_utils::time;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

pub use appcenter_types as types;
pub use appcenter_utils as utils;
pub use error::{ApiError, GENERIC_FAILURE};
pub use guard::{LOGIN_PATH, PageAccess};
pub use settings::SETTINGS_TTL;
pub use token::TokenStore;

use settings::UiSettings;

/// All calls go below this fixed path prefix on the server origin.
pub const API_PREFIX: &str = "/api/v1";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 8;

/// A normalized API response: parsed JSON, or the raw response for
/// non-JSON bodies (downloads and the like).
#[derive(Debug)]
pub enum ApiResponse {
    Json(Value),
    Raw(reqwest::Response),
}

/// Per-request knobs for [`Client::request`]. Defaults to a bare GET.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid server origin: {0}")]
    InvalidOrigin(#[from] url::ParseError),
    #[error("no platform data directory for the token store")]
    NoDataDir,
    #[error("failed to construct HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct ClientBuilder {
    origin: String,
    token_path: Option<PathBuf>,
    settings_ttl: Duration,
}

impl ClientBuilder {
    /// Token file location; defaults to the platform data directory.
    #[must_use]
    pub fn token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn settings_ttl(mut self, ttl: Duration) -> Self {
        self.settings_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<Client, BuildError> {
        let base = Url::parse(&self.origin)?;
        let tokens = match self.token_path {
            Some(path) => TokenStore::at(path),
            None => TokenStore::new().ok_or(BuildError::NoDataDir)?,
        };
        Ok(Client {
            http: http_client()?,
            base,
            tokens,
            ui: UiSettings::new(self.settings_ttl),
        })
    }
}

fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Client facade for one AppCenter server.
///
/// Cheap to share by reference; all methods take `&self`. The token store is
/// re-read on every request, so a login from elsewhere in the process is
/// picked up without rebuilding the client.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
    tokens: TokenStore,
    ui: UiSettings,
}

impl Client {
    pub fn builder(origin: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            origin: origin.into(),
            token_path: None,
            settings_ttl: SETTINGS_TTL,
        }
    }

    pub fn new(origin: impl Into<String>) -> Result<Self, BuildError> {
        Self::builder(origin).build()
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Issue a request against `API_PREFIX + path`.
    ///
    /// The bearer header is attached only when a token is stored; an absent
    /// token sends no `Authorization` header at all. A 401 fails before the
    /// body is read. JSON bodies are parsed and error `detail` surfaced;
    /// non-JSON success hands back the raw response.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.base.join(&format!("{API_PREFIX}{path}"))?;
        let token = self.tokens.get()?;

        let mut builder = self.http.request(options.method, url).headers(options.headers);
        if !token.is_empty() {
            builder = builder.bearer_auth(&token);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("application/json"));

        if is_json {
            let body: Value = response.json().await?;
            if !status.is_success() {
                let detail = body
                    .get("detail")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                return Err(ApiError::request_failed(detail));
            }
            return Ok(ApiResponse::Json(body));
        }

        if !status.is_success() {
            return Err(ApiError::request_failed(None));
        }
        Ok(ApiResponse::Raw(response))
    }

    /// GET a path that must answer with JSON.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        match self.request(path, RequestOptions::default()).await? {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Raw(_) => Err(ApiError::NotJson),
        }
    }

    /// POST a JSON body to a path that must answer with JSON.
    pub async fn post_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let options = RequestOptions::default().method(Method::POST).json(body);
        match self.request(path, options).await? {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Raw(_) => Err(ApiError::NotJson),
        }
    }

    /// Authenticate and persist the returned bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password })?;
        let value = self.post_json("/auth/login", body).await?;
        let token: TokenResponse = serde_json::from_value(value)?;
        self.tokens.set(&token.access_token)?;
        Ok(())
    }

    /// Drop the stored credential. Local only; no server round-trip.
    pub fn logout(&self) -> std::io::Result<()> {
        self.tokens.clear()
    }

    /// Ensure the UI settings cache has been loaded or attempted.
    ///
    /// Failures are logged and swallowed; the cache keeps its prior value
    /// and [`Client::ui_timezone`] falls back to the platform zone. Use
    /// [`Client::refresh_ui`] to observe the failure instead.
    pub async fn init_ui(&self, force: bool) {
        if let Err(err) = self.refresh_ui(force).await {
            tracing::debug!(error = %err, "settings refresh failed; keeping cached timezone");
        }
    }

    /// Refresh the UI settings cache, reporting the outcome.
    pub async fn refresh_ui(&self, force: bool) -> Result<(), ApiError> {
        self.ui.refresh(self, force).await
    }

    /// Resolved display timezone: the server override, the platform zone,
    /// or `"UTC"`. Synchronous; never fetches.
    #[must_use]
    pub fn ui_timezone(&self) -> String {
        self.ui.timezone()
    }

    /// Render a server timestamp value in the resolved UI timezone.
    #[must_use]
    pub fn format_timestamp(&self, value: &Value) -> String {
        time::format_value(value, &self.ui_timezone())
    }

    /// Coarse relative-time rendering for a server timestamp value.
    #[must_use]
    pub fn relative_timestamp(&self, value: &Value) -> String {
        time::relative(value)
    }
}
