//! Error types for chart fetching.
//!
//! Two tiers exist. [`ChartError`] is the fatal taxonomy: any of its variants
//! ends the run. [`FieldError`] describes a single field that could not be
//! parsed; it is always downgraded to a zero value plus a
//! [`Warning`](crate::observability::Warning) by the caller.

use thiserror::Error;

/// Convenience alias for results carrying a [`ChartError`].
pub type Result<T> = std::result::Result<T, ChartError>;

/// The main error type for chart-fetcher operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The chart URL is not one of the known categories.
    #[error("Invalid URL: {0} is not a supported chart")]
    UnlistedUrl(String),

    /// The requested item count is not usable.
    #[error("Invalid item count: {0}")]
    InvalidCount(String),

    /// A command line option has an unusable value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be completed at all.
    #[error("GET {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying error description.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("GET {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The chart page has no `<table>` element.
    #[error("No chart table found in {url}")]
    TableNotFound {
        /// Chart page URL.
        url: String,
    },

    /// A URL could not be resolved against the site base.
    #[error("Cannot resolve {path} against {base}: {message}")]
    UrlResolution {
        /// Base URL.
        base: String,
        /// Relative path.
        path: String,
        /// Parser error description.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// A spawned task panicked or was aborted.
    #[error("Task join error: {0}")]
    Join(String),

    /// The result channel was dropped before delivering.
    #[error("Result channel closed before delivery")]
    ChannelClosed,

    /// Serialization of the batch failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChartError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for ChartError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

/// Error raised when a single field cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field markers were not present.
    #[error("{field} not found")]
    Missing {
        /// Field name.
        field: &'static str,
    },

    /// The field text was present but malformed.
    #[error("{field} {value:?} is not valid: {reason}")]
    Malformed {
        /// Field name.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
        /// Parser message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = ChartError::transport("https://example.com", "connection refused");
        assert_eq!(
            err.to_string(),
            "GET https://example.com failed: connection refused"
        );
    }

    #[test]
    fn test_status_display() {
        let err = ChartError::Status {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_field_error_display() {
        let missing = FieldError::Missing { field: "rating" };
        assert_eq!(missing.to_string(), "rating not found");

        let malformed = FieldError::Malformed {
            field: "release year",
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(malformed.to_string().contains("\"abc\""));
    }
}
