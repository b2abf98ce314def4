//! Email lookup endpoints.

use crate::options::LookupOptions;
use crate::IntelClient;
use ipintel_core::{EmailReport, Result};

/// Email lookup endpoints
pub struct EmailApi<'a> {
    client: &'a IntelClient,
}

impl<'a> EmailApi<'a> {
    pub(crate) fn new(client: &'a IntelClient) -> Self {
        Self { client }
    }

    /// Check whether an email address belongs to a disposable provider
    pub async fn check(&self, email: &str, options: &LookupOptions) -> Result<EmailReport> {
        self.client.lookup_email(email, options).await
    }
}
