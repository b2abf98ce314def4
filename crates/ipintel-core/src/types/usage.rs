use serde::{Deserialize, Serialize};

/// Account usage counters from the dashboard export endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageReport {
    /// Queries consumed today
    #[serde(default)]
    pub queries_today: Option<u64>,

    /// Daily query allowance for the account's plan
    #[serde(default)]
    pub daily_limit: Option<u64>,

    /// Queries consumed this month
    #[serde(default)]
    pub queries_month: Option<u64>,

    /// Monthly query allowance for the account's plan
    #[serde(default)]
    pub monthly_limit: Option<u64>,

    /// Plan name
    #[serde(default)]
    pub plan_tier: Option<String>,

    /// Burst tokens still available this window
    #[serde(default)]
    pub burst_tokens_available: Option<u32>,
}

impl UsageReport {
    /// Queries left today, when both counters are known
    #[must_use]
    pub fn remaining_today(&self) -> Option<u64> {
        match (self.daily_limit, self.queries_today) {
            (Some(limit), Some(used)) => Some(limit.saturating_sub(used)),
            _ => None,
        }
    }
}
