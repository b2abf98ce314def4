use serde::{Deserialize, Serialize};

/// Reputation record for an email address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailReport {
    /// Upstream status for this record
    #[serde(default)]
    pub status: Option<String>,

    /// Whether the mailbox belongs to a disposable provider ("yes"/"no")
    #[serde(default)]
    pub disposable: Option<String>,

    /// Answering node that served the query
    #[serde(default)]
    pub node: Option<String>,

    /// Server-side query duration
    #[serde(default, rename = "time")]
    pub query_time: Option<String>,
}

impl EmailReport {
    /// Returns true if the upstream flagged the address as disposable
    #[must_use]
    pub fn is_disposable(&self) -> bool {
        self.disposable
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case("yes"))
    }
}
