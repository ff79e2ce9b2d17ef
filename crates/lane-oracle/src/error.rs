//! Error types for oracle calls.

use thiserror::Error;

/// The oracle could not be reached or refused the call.
///
/// A reply that is not a usable country code is never an error; the adapter
/// turns it into `None`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Transport failure or an unexpected HTTP status.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The provider rejected the credentials.
    #[error("oracle rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The provider's rate limit was hit.
    #[error("oracle rate limit exceeded{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    /// No response within the configured timeout.
    #[error("oracle request timed out")]
    Timeout,

    /// The API key environment variable is unset or blank.
    #[error("environment variable {var} is not set")]
    MissingApiKey { var: &'static str },
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs
        .map(|secs| format!(", retry after {secs} seconds"))
        .unwrap_or_default()
}

impl OracleError {
    /// Returns a short message suitable for end users.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unavailable(_) | Self::Timeout => {
                "Could not reach the disambiguation service. Please check your connection."
            }
            Self::Unauthorized { .. } => "The disambiguation service rejected the API key.",
            Self::RateLimited { .. } => {
                "The disambiguation service rate limit was reached. Please try again later."
            }
            Self::MissingApiKey { .. } => {
                "No API key configured for the disambiguation service."
            }
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = OracleError::Unavailable("connection refused".to_string());
        assert!(err.user_message().contains("connection"));
        let err = OracleError::MissingApiKey {
            var: "MISTRAL_API_KEY",
        };
        assert!(err.to_string().contains("MISTRAL_API_KEY"));
    }

    #[test]
    fn rate_limit_message_mentions_delay() {
        let err = OracleError::RateLimited {
            retry_after_secs: Some(30),
        };
        assert_eq!(
            err.to_string(),
            "oracle rate limit exceeded, retry after 30 seconds"
        );
        let err = OracleError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(err.to_string(), "oracle rate limit exceeded");
    }
}
