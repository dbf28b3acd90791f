use crate::core::config::ConfigError;
use crate::core::errors::MudrexError;
use crate::core::kernel::auth::Authenticator;
use crate::core::kernel::rate_limiter::RateLimiter;
use crate::core::types::ApiResponse;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Status and body of a response that was not an HTTP-level failure
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RestResponse {
    /// Decode the body as a response envelope
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<ApiResponse<T>, MudrexError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            MudrexError::InvalidResponse(format!("Failed to decode response envelope: {}", e))
        })
    }

    /// Decode the envelope and return its `data`
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, MudrexError> {
        self.envelope::<T>()?.into_data(self.status.as_u16())
    }

    /// Accept the response without requiring `data`.
    ///
    /// The status already marks success, so a body that is empty or not an
    /// envelope (such as a bare `OK`) is accepted. An envelope must not report
    /// `success: false`.
    pub fn into_ack(self) -> Result<(), MudrexError> {
        match serde_json::from_slice::<ApiResponse<Value>>(&self.body) {
            Ok(envelope) => envelope.ensure_success(self.status.as_u16()),
            Err(_) => {
                debug!(status = %self.status, "acknowledged without an envelope");
                Ok(())
            }
        }
    }
}

/// REST client trait for making HTTP requests
///
/// `execute` is the single request pipeline; the provided methods decode the
/// response envelope on top of it.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Send one request and return its status and raw body.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the base URL, including any query string
    /// * `body` - JSON body; `None` is sent as an empty payload
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, MudrexError>;

    /// GET and decode the envelope's `data`
    async fn get_json<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T, MudrexError> {
        self.execute(Method::GET, path, None).await?.into_data()
    }

    /// POST and decode the envelope's `data`
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, MudrexError> {
        self.execute(Method::POST, path, body).await?.into_data()
    }

    /// PATCH and decode the envelope's `data`
    async fn patch_json<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, MudrexError> {
        self.execute(Method::PATCH, path, Some(body))
            .await?
            .into_data()
    }

    /// Send a request whose response carries no payload worth decoding
    async fn send_ack(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), MudrexError> {
        self.execute(method, path, body).await?.into_ack()
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API; request paths are appended to it
    pub base_url: String,
    /// Request timeout in seconds, covering connect, send and the full body read
    pub timeout_seconds: u64,
    /// Client-side request budget shared by every call through this client
    pub requests_per_second: f64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_seconds: 30,
            requests_per_second: 2.0,
            user_agent: concat!("mudrex-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the request budget
    pub fn with_requests_per_second(mut self, requests_per_second: f64) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            authenticator: None,
        }
    }

    /// Set the authenticator applied to every request
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, MudrexError> {
        if self.config.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "request timeout must be at least one second".to_string(),
            )
            .into());
        }
        let limiter = RateLimiter::per_second(self.config.requests_per_second)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            authenticator: self.authenticator,
            limiter: Arc::new(limiter),
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    authenticator: Option<Arc<dyn Authenticator>>,
    limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("min_interval", &self.limiter.min_interval())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Build the full URL for a path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Read the full body and classify failures
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<RestResponse, MudrexError> {
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        trace!("Response body: {}", String::from_utf8_lossy(&body));

        if status.as_u16() >= 400 {
            return Err(MudrexError::from_response(status.as_u16(), &body));
        }

        Ok(RestResponse { status, body })
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, MudrexError> {
        let payload = match body {
            Some(value) => serde_json::to_vec(value)?,
            None => Vec::new(),
        };

        self.limiter.acquire().await;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(authenticator) = &self.authenticator {
            authenticator.apply(&mut headers);
        }

        let response = self
            .client
            .request(method, self.build_url(path))
            .headers(headers)
            .body(payload)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
