//! IP lookup endpoints.

use crate::options::LookupOptions;
use crate::IntelClient;
use ipintel_core::{BatchReport, IpReport, Result};

/// IP lookup endpoints
pub struct IpApi<'a> {
    client: &'a IntelClient,
}

impl<'a> IpApi<'a> {
    pub(crate) fn new(client: &'a IntelClient) -> Self {
        Self { client }
    }

    /// Look up the reputation of a single IP address
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = LookupOptions::new().vpn(true).risk(true);
    /// let report = client.ip().lookup("8.8.8.8", &options).await?;
    /// println!("Proxy: {}", report.is_proxy());
    /// ```
    pub async fn lookup(&self, ip: &str, options: &LookupOptions) -> Result<IpReport> {
        self.client.lookup_ip(ip, options).await
    }

    /// Look up several IP addresses in one request.
    ///
    /// Addresses the upstream has no record for are absent from the result
    /// map rather than reported as errors.
    pub async fn lookup_many<I, S>(&self, ips: I, options: &LookupOptions) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ips: Vec<String> = ips.into_iter().map(Into::into).collect();
        self.client.lookup_ip_batch(&ips, options).await
    }
}
