//! Request execution: cache, admission, authenticated dispatch and retry.
//!
//! [`RequestExecutor`] owns the cache and the rate limiter. One executor is
//! built per credential and shared by every operation.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client as ReqwestClient, Method};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::cache::ResponseCache;
use super::classify::{
    Failure, base_context, classify, is_logical_failure, parse_retry_after,
};
use super::endpoints::{ApiSurface, EndpointConfig};
use super::error::MapsError;
use super::rate_limiter::{RateLimitConfig, RateLimiter};

/// Header carrying the credential on header-auth surfaces.
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
/// Header naming the response fields wanted on header-auth surfaces.
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
/// Mask sent when the caller asked for no specific fields.
pub const ALL_FIELDS: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Backoff after attempt `n` is `retry_base_delay_ms * 2^n`.
    pub retry_base_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

/// One logical call against a provider endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    surface: ApiSurface,
    path: String,
    method: Method,
    query: Vec<(String, String)>,
    body: Option<Value>,
    cache_ttl: Option<Duration>,
    field_mask: Option<String>,
}

impl ApiRequest {
    fn new(surface: ApiSurface, method: Method, path: impl Into<String>) -> Self {
        Self {
            surface,
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            cache_ttl: None,
            field_mask: None,
        }
    }

    pub fn get(surface: ApiSurface, path: impl Into<String>) -> Self {
        Self::new(surface, Method::GET, path)
    }

    pub fn post(surface: ApiSurface, path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(surface, Method::POST, path);
        request.body = Some(body);
        request
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn param_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Cache successful responses for `ttl`. Requests without a TTL are never cached.
    pub fn cache_for(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl).filter(|ttl| !ttl.is_zero());
        self
    }

    pub fn field_mask(mut self, mask: impl Into<String>) -> Self {
        self.field_mask = Some(mask.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn surface(&self) -> ApiSurface {
        self.surface
    }

    /// Deterministic identity of this request: endpoint, query, body and mask.
    pub fn cache_key(&self) -> String {
        json!([
            format!("{:?}", self.surface),
            self.path,
            self.query,
            self.body,
            self.field_mask,
        ])
        .to_string()
    }
}

/// Turns [`ApiRequest`]s into JSON payloads or a [`MapsError`].
#[derive(Debug)]
pub struct RequestExecutor {
    http: ReqwestClient,
    api_key: String,
    endpoints: EndpointConfig,
    cache: ResponseCache,
    rate_limiter: Option<RateLimiter>,
    max_attempts: u32,
    base_delay: Duration,
}

impl RequestExecutor {
    pub fn new(
        api_key: impl Into<String>,
        http: &HttpConfig,
        rate_limit: &RateLimitConfig,
        endpoints: EndpointConfig,
    ) -> Result<Self, MapsError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MapsError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http: client,
            api_key: api_key.into(),
            endpoints,
            cache: ResponseCache::new(),
            rate_limiter: rate_limit.enabled.then(|| RateLimiter::new(rate_limit)),
            max_attempts: http.max_attempts.max(1),
            base_delay: Duration::from_millis(http.retry_base_delay_ms),
        })
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Execute one logical call.
    ///
    /// A fresh cache hit returns without touching the rate limiter or the
    /// network. Transport and HTTP failures are retried with exponential
    /// backoff; a 429 waits for `Retry-After` when the provider sends it.
    /// Payloads whose `status` is not `OK` fail immediately.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, MapsError> {
        let cache_key = request.cache_key();
        if request.cache_ttl.is_some() {
            if let Some(hit) = self.cache.get(&cache_key) {
                debug!(endpoint = %request.path, "Cache hit");
                return Ok(hit);
            }
        }

        if let Some(limiter) = &self.rate_limiter {
            limiter.admit(&request.path).await;
        }

        let url = self.endpoints.url_for(request.surface, &request.path);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(endpoint = %request.path, attempt = attempts, method = %request.method, "Sending request");

            let failure = match self.send_once(request, &url).await {
                Ok(payload) => {
                    if let Some(ttl) = request.cache_ttl {
                        self.cache.put(cache_key, payload.clone(), ttl);
                    }
                    return Ok(payload);
                }
                Err(failure) => failure,
            };

            if !failure.class().is_retryable() || attempts >= self.max_attempts {
                let error = classify(&request.path, &failure)
                    .merge_context(base_context(&request.path, &url, attempts));
                warn!(
                    endpoint = %request.path,
                    attempts,
                    kind = %error.kind,
                    "Request failed: {}",
                    error.message
                );
                return Err(error);
            }

            let delay = self.retry_delay(&failure, attempts);
            warn!(
                endpoint = %request.path,
                attempt = attempts,
                delay_ms = delay.as_millis() as u64,
                throttled = failure.is_throttled(),
                "Retrying request"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// A 429 waits for `Retry-After` when present; everything else backs off.
    fn retry_delay(&self, failure: &Failure, attempts_made: u32) -> Duration {
        if failure.is_throttled() {
            if let Some(delay) = failure.retry_after() {
                return delay;
            }
        }
        self.backoff_delay(attempts_made)
    }

    /// `base * 2^attempts_made`, so 2s then 4s with the default base.
    fn backoff_delay(&self, attempts_made: u32) -> Duration {
        let multiplier = 1u32 << attempts_made.min(8);
        self.base_delay.saturating_mul(multiplier)
    }

    async fn send_once(&self, request: &ApiRequest, url: &str) -> Result<Value, Failure> {
        let mut builder = self.http.request(request.method.clone(), url);

        if request.surface.uses_header_auth() {
            builder = builder.header(API_KEY_HEADER, &self.api_key).header(
                FIELD_MASK_HEADER,
                request.field_mask.as_deref().unwrap_or(ALL_FIELDS),
            );
        } else {
            builder = builder.query(&[("key", self.api_key.as_str())]);
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.method == Method::POST {
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        let response = builder.send().await.map_err(Failure::Transport)?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            let body = response.json::<Value>().await.ok();
            return Err(Failure::Http {
                status,
                retry_after,
                body,
            });
        }

        let payload: Value = response.json().await.map_err(Failure::Transport)?;
        if is_logical_failure(&payload) {
            return Err(Failure::Upstream { status, payload });
        }
        Ok(payload)
    }
}
