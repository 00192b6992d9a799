use regex::Regex;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

pub mod endpoints;

/// Header carrying the application identity on every request.
pub const APP_NAME_HEADER: &str = "X-App-Name";

static LOGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").expect("valid login pattern"));

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid GitHub login: {0:?}")]
    InvalidLogin(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Which backend facade a request goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaseUrl {
    #[default]
    Github,
    Scientific,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Use the configured request timeout.
    #[default]
    Default,
    /// Never abort; the backend may be recomputing.
    Unbounded,
    After(Duration),
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub base_url: BaseUrl,
    pub timeout: TimeoutPolicy,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            body: None,
            base_url: BaseUrl::Github,
            timeout: TimeoutPolicy::Default,
        }
    }
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a query parameter; `None` values are left out of the query string.
    pub fn query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn timeout(mut self, timeout: TimeoutPolicy) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn base_url(&self, base_url: BaseUrl) -> &str {
        match base_url {
            BaseUrl::Github => self.config.github_base_url.trim_end_matches('/'),
            BaseUrl::Scientific => self.config.scientific_base_url.trim_end_matches('/'),
        }
    }

    /// Issue one request and decode the JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url(options.base_url), path);
        debug!("{} {}", options.method, url);

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .header(APP_NAME_HEADER, &self.config.app_name)
            .query(&options.query);

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        request = match options.timeout {
            TimeoutPolicy::Default => {
                request.timeout(Duration::from_secs(self.config.request_timeout_secs))
            }
            TimeoutPolicy::After(duration) => request.timeout(duration),
            TimeoutPolicy::Unbounded => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "{} {} failed", options.method, url);
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Path segment for a user, rejected before any request is sent if it is not a GitHub login.
    pub(crate) fn user_path(login: &str, suffix: &str) -> Result<String, ApiError> {
        if !LOGIN_PATTERN.is_match(login) {
            return Err(ApiError::InvalidLogin(login.to_string()));
        }
        Ok(format!("/{}{}", login, suffix))
    }
}
