//! Blocking variants of the client entry points.
//!
//! The blocking client owns a current-thread tokio runtime and drives the
//! async client with it, so option resolution, caching, and status
//! classification are literally the same code in both call styles - the only
//! difference is that these methods block the calling thread through the
//! transport call instead of suspending.
//!
//! Do not use this client from inside an async context; entering `block_on`
//! on a runtime thread panics. Use the async [`IntelClient`](crate::IntelClient)
//! there instead.

use crate::options::LookupOptions;
use ipintel_core::{BatchReport, EmailReport, IpReport, Result, UsageReport};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Blocking reputation API client
pub struct IntelClient {
    inner: crate::IntelClient,
    runtime: Runtime,
}

impl IntelClient {
    /// Create a new blocking client with the given API key using default
    /// settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        IntelClientBuilder::new().api_key(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> IntelClientBuilder {
        IntelClientBuilder::new()
    }

    /// Look up the reputation of a single IP address
    pub fn lookup(&self, ip: &str, options: &LookupOptions) -> Result<IpReport> {
        self.runtime.block_on(self.inner.ip().lookup(ip, options))
    }

    /// Look up several IP addresses in one request
    pub fn lookup_many<I, S>(&self, ips: I, options: &LookupOptions) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime
            .block_on(self.inner.ip().lookup_many(ips, options))
    }

    /// Check whether an email address belongs to a disposable provider
    pub fn check_email(&self, email: &str, options: &LookupOptions) -> Result<EmailReport> {
        self.runtime
            .block_on(self.inner.email().check(email, options))
    }

    /// Fetch the account's query usage counters
    pub fn dashboard_usage(&self, options: &LookupOptions) -> Result<UsageReport> {
        self.runtime.block_on(self.inner.dashboard().usage(options))
    }

    /// Drop every cached response on this client instance
    pub fn clear_caches(&self) {
        self.inner.clear_caches();
    }
}

/// Builder for configuring a blocking [`IntelClient`]
#[derive(Default)]
pub struct IntelClientBuilder {
    inner: crate::IntelClientBuilder,
}

impl IntelClientBuilder {
    /// Create a new builder with default settings and no API key
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: crate::IntelClientBuilder::new(),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(agent);
        self
    }

    /// Enable or disable response caching (enabled by default)
    #[must_use]
    pub fn caching(mut self, enabled: bool) -> Self {
        self.inner = self.inner.caching(enabled);
        self
    }

    /// Set the default TTL for cached responses
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.inner = self.inner.default_ttl(ttl);
        self
    }

    /// Build the blocking client
    #[must_use]
    pub fn build(self) -> IntelClient {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build blocking runtime");

        IntelClient {
            inner: self.inner.build(),
            runtime,
        }
    }
}
