//! Main reputation API client implementation.

use crate::api::{DashboardApi, EmailApi, IpApi};
use crate::cache::ResponseCache;
use crate::options::LookupOptions;
use ipintel_core::{
    classify, BatchReport, EmailReport, IntelError, IpReport, Result, UsageReport,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The reputation API base URL
const DEFAULT_BASE_URL: &str = "https://api.ipintel.example";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cache TTL for successful responses
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Main reputation API client
#[derive(Clone)]
pub struct IntelClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
    caching: bool,
    default_ttl: Duration,
    caches: Caches,
}

/// One cache per response type; never cross-populated.
#[derive(Default)]
struct Caches {
    ip: ResponseCache<IpReport>,
    batch: ResponseCache<BatchReport>,
    email: ResponseCache<EmailReport>,
    usage: ResponseCache<UsageReport>,
}

impl IntelClient {
    /// Create a new client with the given API key using default settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        IntelClientBuilder::new().api_key(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> IntelClientBuilder {
        IntelClientBuilder::new()
    }

    /// Access IP lookup endpoints
    #[must_use]
    pub fn ip(&self) -> IpApi<'_> {
        IpApi::new(self)
    }

    /// Access email lookup endpoints
    #[must_use]
    pub fn email(&self) -> EmailApi<'_> {
        EmailApi::new(self)
    }

    /// Access dashboard/account endpoints
    #[must_use]
    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    /// Drop every cached response on this client instance
    pub fn clear_caches(&self) {
        self.inner.caches.ip.clear();
        self.inner.caches.batch.clear();
        self.inner.caches.email.clear();
        self.inner.caches.usage.clear();
    }

    /// Look up a single IP address
    pub(crate) async fn lookup_ip(&self, ip: &str, options: &LookupOptions) -> Result<IpReport> {
        validate_subject(ip)?;
        let url = self.build_url(&format!("/v2/{ip}"), &options.to_query_pairs());
        self.fetch_cached(&self.inner.caches.ip, &url, self.ttl_for(options))
            .await
    }

    /// Look up a batch of IP addresses in one request.
    ///
    /// The upstream answers with one partial record per known subject under a
    /// shared top-level status; that status is merged into each record before
    /// decoding. Subjects the upstream has no record for are omitted from the
    /// result map.
    pub(crate) async fn lookup_ip_batch(
        &self,
        ips: &[String],
        options: &LookupOptions,
    ) -> Result<BatchReport> {
        if ips.is_empty() {
            return Err(IntelError::MalformedRequest {
                message: "batch lookup requires at least one address".to_string(),
            });
        }
        for ip in ips {
            validate_subject(ip)?;
        }

        let mut pairs = options.to_query_pairs();
        pairs.push(("ips", ips.join(",")));
        let url = self.build_url("/v2/", &pairs);

        if self.inner.caching {
            if let Some(hit) = self.inner.caches.batch.get(&url) {
                debug!(url = %url, "cache hit");
                return Ok(hit);
            }
        }

        let payload = self.fetch_payload(&url).await?;
        let status = payload
            .get("status")
            .and_then(Value::as_str)
            .map(|s| Value::String(s.to_string()));

        let Value::Object(records) = payload else {
            return Err(IntelError::Generic(
                "malformed response payload: expected an object".to_string(),
            ));
        };

        let mut report = BatchReport::new();
        for ip in ips {
            let Some(record) = records.get(ip.as_str()) else {
                continue;
            };
            let mut record = record.clone();
            if let (Value::Object(fields), Some(status)) = (&mut record, &status) {
                fields.insert("status".to_string(), status.clone());
            }
            let decoded: IpReport = serde_json::from_value(record)
                .map_err(|e| IntelError::Generic(format!("malformed response payload: {e}")))?;
            report.insert(ip.clone(), decoded);
        }

        if self.inner.caching {
            self.inner
                .caches
                .batch
                .put(&url, report.clone(), self.ttl_for(options));
        }
        Ok(report)
    }

    /// Look up an email address
    pub(crate) async fn lookup_email(
        &self,
        email: &str,
        options: &LookupOptions,
    ) -> Result<EmailReport> {
        validate_subject(email)?;
        let url = self.build_url(&format!("/v2/{email}"), &options.to_query_pairs());
        self.fetch_cached(&self.inner.caches.email, &url, self.ttl_for(options))
            .await
    }

    /// Fetch account usage counters from the dashboard.
    ///
    /// Unlike the lookup endpoints, the dashboard refuses anonymous queries,
    /// so a missing key fails here before any transport call.
    pub(crate) async fn dashboard_usage(&self, options: &LookupOptions) -> Result<UsageReport> {
        if self.inner.api_key.is_none() {
            return Err(IntelError::InvalidCredentials {
                message: "dashboard endpoints require an API key".to_string(),
            });
        }
        let url = self.build_url("/dashboard/export/usage/", &options.to_query_pairs());
        self.fetch_cached(&self.inner.caches.usage, &url, self.ttl_for(options))
            .await
    }

    /// Cache-through fetch shared by the single-record endpoints.
    async fn fetch_cached<T>(
        &self,
        cache: &ResponseCache<T>,
        url: &str,
        ttl: Duration,
    ) -> Result<T>
    where
        T: DeserializeOwned + Clone,
    {
        if self.inner.caching {
            if let Some(hit) = cache.get(url) {
                debug!(url = %url, "cache hit");
                return Ok(hit);
            }
        }

        let payload = self.fetch_payload(url).await?;
        let decoded: T = serde_json::from_value(payload)
            .map_err(|e| IntelError::Generic(format!("malformed response payload: {e}")))?;

        if self.inner.caching {
            cache.put(url, decoded.clone(), ttl);
        }
        Ok(decoded)
    }

    /// Perform the transport call and classify the decoded payload.
    ///
    /// This is the only point in a call where the task suspends. Classified
    /// errors are raised here, before any cache write can happen.
    async fn fetch_payload(&self, url: &str) -> Result<Value> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IntelError::Transport(e.to_string()))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(IntelError::Transport(format!(
                "unexpected HTTP status {http_status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IntelError::Transport(e.to_string()))?;

        let payload: Value = serde_json::from_slice(&body)
            .map_err(|e| IntelError::Generic(format!("malformed response payload: {e}")))?;

        let status = payload.get("status").and_then(Value::as_str).unwrap_or("ok");
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if let Some(err) = classify(status, message, &payload) {
            if matches!(err, IntelError::RateLimited { .. }) {
                warn!("rate limited by reputation API");
            }
            return Err(err);
        }

        Ok(payload)
    }

    /// Per-request TTL override, or the client default.
    fn ttl_for(&self, options: &LookupOptions) -> Duration {
        options.cache_ttl_override().unwrap_or(self.inner.default_ttl)
    }

    /// Build the final URL: path, API key if configured, then the resolved
    /// parameters in their canonical order. The result doubles as the cache
    /// signature for the request.
    fn build_url(&self, path: &str, params: &[(&'static str, String)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);
        let mut separator = '?';

        if let Some(key) = &self.inner.api_key {
            url.push(separator);
            separator = '&';
            url.push_str("key=");
            url.push_str(&urlencoding::encode(key));
        }

        for (name, value) in params {
            url.push(separator);
            separator = '&';
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }
}

/// Reject blank subjects before any transport call.
fn validate_subject(subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(IntelError::MalformedRequest {
            message: "subject must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Builder for configuring an [`IntelClient`]
pub struct IntelClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    caching: bool,
    default_ttl: Duration,
}

impl Default for IntelClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IntelClientBuilder {
    /// Create a new builder with default settings and no API key
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ipintel-rust/{}", env!("CARGO_PKG_VERSION")),
            caching: true,
            default_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Set the API key. Without one, lookups run as anonymous queries and
    /// the dashboard endpoints fail.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Enable or disable response caching (enabled by default)
    #[must_use]
    pub const fn caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        self
    }

    /// Set the default TTL for cached responses
    #[must_use]
    pub const fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> IntelClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        IntelClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                base_url: self.base_url,
                caching: self.caching,
                default_ttl: self.default_ttl,
                caches: Caches::default(),
            }),
        }
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
