//! Upstream status classification.
//!
//! The reputation API signals failures in-band: every response carries a
//! `status` field and, on failure, a human-readable `message`. This module is
//! the single decision table that maps that pair onto [`IntelError`], shared
//! by every endpoint so error semantics never drift between call paths.

use crate::error::{IntelError, QuotaStatus};
use serde_json::Value;

/// Classify an upstream `status`/`message` pair.
///
/// Returns `None` for success statuses (`"ok"` and `"success"`, treated as
/// equivalent, case-insensitive). Otherwise returns the typed error the
/// status/message combination maps to. Quota errors pull their structured
/// counters out of `payload` when the upstream included them.
#[must_use]
pub fn classify(status: &str, message: &str, payload: &Value) -> Option<IntelError> {
    match status.to_ascii_lowercase().as_str() {
        "ok" | "success" => None,
        "warning" => Some(IntelError::UpstreamWarning {
            message: message.to_string(),
        }),
        "denied" => Some(IntelError::RequestDenied {
            message: message.to_string(),
        }),
        // "API key" is matched case-sensitively: the upstream spells the
        // credential errors exactly this way, and "api key" appears in
        // unrelated informational messages.
        "error" if message.contains("API key") => Some(IntelError::InvalidCredentials {
            message: message.to_string(),
        }),
        "error" if message.contains("rate limit") => Some(IntelError::RateLimited {
            message: message.to_string(),
        }),
        "error" if message.contains("plan limit") || message.contains("query limit") => {
            Some(IntelError::QuotaExceeded {
                message: message.to_string(),
                quota: quota_from_payload(payload),
            })
        }
        "error" => Some(IntelError::Upstream {
            message: message.to_string(),
        }),
        _ => Some(IntelError::Generic(format!(
            "Unknown status: {status} - {message}"
        ))),
    }
}

/// Pull the optional quota counters out of a raw error payload.
fn quota_from_payload(payload: &Value) -> QuotaStatus {
    QuotaStatus {
        plan: payload
            .get("plan")
            .and_then(Value::as_str)
            .map(String::from),
        queries_today: payload.get("queries_today").and_then(Value::as_u64),
        queries_month: payload.get("queries_month").and_then(Value::as_u64),
        max_queries_day: payload.get("maxQueries_day").and_then(Value::as_u64),
        max_queries_month: payload.get("maxQueries_month").and_then(Value::as_u64),
        days_until_reset: payload
            .get("days_until_reset")
            .and_then(Value::as_u64)
            .and_then(|d| u32::try_from(d).ok()),
    }
}
