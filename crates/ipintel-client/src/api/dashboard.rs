//! Dashboard/account endpoints.

use crate::options::LookupOptions;
use crate::IntelClient;
use ipintel_core::{Result, UsageReport};

/// Dashboard/account endpoints
pub struct DashboardApi<'a> {
    client: &'a IntelClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a IntelClient) -> Self {
        Self { client }
    }

    /// Fetch the account's query usage counters.
    ///
    /// Requires a configured API key; fails with
    /// [`IntelError::InvalidCredentials`](ipintel_core::IntelError::InvalidCredentials)
    /// before any transport call when none is set.
    pub async fn usage(&self, options: &LookupOptions) -> Result<UsageReport> {
        self.client.dashboard_usage(options).await
    }
}
