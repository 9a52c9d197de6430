use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use moka::future::Cache;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::error::{server_error, ApiError};
use crate::api::query::Envelope;
use crate::config::BackendConfig;
use crate::observability::ApiMetrics;

const RETRY_ATTEMPTS: u32 = 3;

/// Rate-limited client for the ticketing backend.
///
/// Read responses are cached under tag-prefixed keys so one invalidation
/// covers every list and badge that a mutation makes stale. Mutations are
/// never cached and never retried; reads retry transient failures with a
/// short backoff.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    cache: Cache<String, serde_json::Value>,
    metrics: Arc<ApiMetrics>,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let token = config.token.clone().ok_or(ApiError::TokenMissing)?;

        let per_minute = NonZeroU32::new(config.rate_limit.requests_per_minute.max(1))
            .expect("clamped to >= 1");
        let burst = NonZeroU32::new(config.rate_limit.burst_capacity.max(1))
            .expect("clamped to >= 1");
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        let cache = Cache::builder()
            .max_capacity(config.cache.max_entries)
            .time_to_live(Duration::from_secs(config.cache.ttl_seconds))
            .build();

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            cache,
            metrics: Arc::new(ApiMetrics::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn metrics(&self) -> Arc<ApiMetrics> {
        Arc::clone(&self.metrics)
    }

    /// GET returning the payload inside the backend's `value` envelope.
    /// `cache_key` opts the call into the tag-prefixed response cache.
    pub async fn get_enveloped<T, Q>(
        &self,
        path: &str,
        query: Option<&Q>,
        cache_key: Option<String>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        if let Some(ref key) = cache_key {
            if let Some(hit) = self.cache.get(key).await {
                self.metrics.record_cache_hit();
                debug!(key, "response cache hit");
                return serde_json::from_value::<Envelope<T>>(hit)
                    .map(|e| e.value)
                    .map_err(|e| ApiError::Decode {
                        url: path.to_string(),
                        detail: e.to_string(),
                    });
            }
            self.metrics.record_cache_miss();
        }

        let raw = self.get_with_retry(path, query).await?;
        if let Some(key) = cache_key {
            self.cache.insert(key, raw.clone()).await;
        }
        serde_json::from_value::<Envelope<T>>(raw)
            .map(|e| e.value)
            .map_err(|e| ApiError::Decode {
                url: path.to_string(),
                detail: e.to_string(),
            })
    }

    async fn get_with_retry<Q>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<serde_json::Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.get_once(path, query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempts < RETRY_ATTEMPTS => {
                    warn!(path, attempt = attempts, error = %e, "read failed, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * attempts as u64)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<Q>(&self, path: &str, query: Option<&Q>) -> Result<serde_json::Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.wait_for_slot().await;
        self.metrics.record_request();

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json");
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await.map_err(|source| {
            self.metrics.record_error();
            ApiError::Network {
                url: url.clone(),
                source,
            }
        })?;
        self.decode(url, response).await
    }

    /// POST a JSON mutation. Mutations bypass the cache and are not
    /// retried; a duplicate fire is worse than a surfaced failure.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        self.wait_for_slot().await;
        self.metrics.record_request();

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| {
                self.metrics.record_error();
                ApiError::Network {
                    url: url.clone(),
                    source,
                }
            })?;
        self.decode(url, response).await.map(|_| ())
    }

    /// POST a multipart mutation (intake and closing payloads).
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<(), ApiError> {
        let url = self.url(path);
        self.wait_for_slot().await;
        self.metrics.record_request();

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|source| {
                self.metrics.record_error();
                ApiError::Network {
                    url: url.clone(),
                    source,
                }
            })?;
        self.decode(url, response).await.map(|_| ())
    }

    async fn decode(
        &self,
        url: String,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;
        if !status.is_success() {
            self.metrics.record_error();
            return Err(server_error(status.as_u16(), &body));
        }
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            detail: e.to_string(),
        })
    }

    /// Drop every cached response whose key starts with `tag`. One call
    /// here is what makes a queue list and its badge refresh together.
    pub async fn invalidate_tag(&self, tag: &str) {
        let stale: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(tag))
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        let dropped = stale.len();
        for key in stale {
            self.cache.invalidate(&key).await;
        }
        debug!(tag, dropped, "invalidated cached responses");
    }

    async fn wait_for_slot(&self) {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
