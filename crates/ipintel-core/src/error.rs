use thiserror::Error;

/// Result type alias for ipintel operations
pub type Result<T> = std::result::Result<T, IntelError>;

/// Errors that can occur when using the reputation API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntelError {
    /// Authentication failed - invalid or missing API key
    #[error("invalid API key: {message}")]
    InvalidCredentials {
        /// Upstream error message, verbatim
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded: {message}")]
    RateLimited {
        /// Upstream error message, verbatim
        message: String,
    },

    /// Plan or query quota exhausted
    #[error("query quota exceeded: {message}")]
    QuotaExceeded {
        /// Upstream error message, verbatim
        message: String,
        /// Structured quota fields, when the upstream supplied them
        quota: QuotaStatus,
    },

    /// The request was rejected before any transport call was made
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Description of what was wrong with the request
        message: String,
    },

    /// The API reported an error this library has no narrower category for
    #[error("API error: {message}")]
    Upstream {
        /// Upstream error message, verbatim
        message: String,
    },

    /// The API answered with a warning status
    #[error("API warning: {message}")]
    UpstreamWarning {
        /// Upstream warning message, verbatim
        message: String,
    },

    /// The API denied the request outright
    #[error("request denied: {message}")]
    RequestDenied {
        /// Upstream denial message, verbatim
        message: String,
    },

    /// Transport-level failure (connection, timeout, I/O)
    #[error("transport failure: {0}")]
    Transport(String),

    /// Unrecognized upstream status or malformed payload
    #[error("{0}")]
    Generic(String),
}

impl IntelError {
    /// Returns true if the error may clear on its own and the call can be
    /// retried later. Retry policy itself is the caller's responsibility.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transport(_))
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. })
    }

    /// Returns the upstream message text, if this error carries one verbatim
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { message }
            | Self::RateLimited { message }
            | Self::QuotaExceeded { message, .. }
            | Self::Upstream { message }
            | Self::UpstreamWarning { message }
            | Self::RequestDenied { message } => Some(message),
            _ => None,
        }
    }
}

/// Quota usage reported alongside a [`IntelError::QuotaExceeded`] error.
///
/// Every field is independently optional - the upstream only includes the
/// counters it tracks for the account's plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Plan name (e.g. "free", "starter")
    pub plan: Option<String>,

    /// Queries consumed today
    pub queries_today: Option<u64>,

    /// Queries consumed this month
    pub queries_month: Option<u64>,

    /// Daily query allowance
    pub max_queries_day: Option<u64>,

    /// Monthly query allowance
    pub max_queries_month: Option<u64>,

    /// Days until the quota window resets
    pub days_until_reset: Option<u32>,
}

impl QuotaStatus {
    /// Returns true if no quota counters were supplied at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.plan.is_none()
            && self.queries_today.is_none()
            && self.queries_month.is_none()
            && self.max_queries_day.is_none()
            && self.max_queries_month.is_none()
            && self.days_until_reset.is_none()
    }
}
