//! Result and error types for Donar.

use thiserror::Error;

/// Result type for Donar operations
pub type DonarResult<T> = Result<T, DonarError>;

/// Errors that can occur in Donar
#[derive(Debug, Error)]
pub enum DonarError {
    /// Empty or malformed locator descriptor
    #[error("Invalid locator for {strategy} lookup: raw locator must be non-empty")]
    InvalidLocator {
        /// Strategy the caller attempted to resolve with
        strategy: String,
    },

    /// Fill requested without a payload
    #[error("Missing input: the fill action requires a non-empty payload")]
    MissingInput,

    /// Strategy name outside the enumerated set (data-driven tables only)
    #[error("Unsupported locator strategy: {name}")]
    UnsupportedStrategy {
        /// The unrecognized strategy name
        name: String,
    },

    /// Action/strategy combination outside the compatibility table
    #[error("The {action} action is not supported for {strategy} locators")]
    UnsupportedAction {
        /// Action kind that was requested
        action: String,
        /// Strategy it was requested against
        strategy: String,
    },

    /// Navigation failed (swallowed at the BasePage boundary by default)
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A suspend-point exceeded its deadline
    #[error("{operation} timed out after {ms}ms")]
    Timeout {
        /// What was being waited for
        operation: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Browser session failure (launch, connection, protocol)
    #[error("Session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// No element matched the resolved query
    #[error("Element not found: {query}")]
    ElementNotFound {
        /// The query that matched nothing
        query: String,
    },

    /// Assertion on rendered state failed
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// Fixture registry failure (construction, teardown)
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// Screenshot capture failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_locator_message() {
        let err = DonarError::InvalidLocator {
            strategy: "ID".to_string(),
        };
        assert!(err.to_string().contains("non-empty"));
        assert!(err.to_string().contains("ID"));
    }

    #[test]
    fn test_unsupported_action_message() {
        let err = DonarError::UnsupportedAction {
            action: "fill".to_string(),
            strategy: "TEXT".to_string(),
        };
        assert!(err.to_string().contains("fill"));
        assert!(err.to_string().contains("TEXT"));
    }

    #[test]
    fn test_timeout_message() {
        let err = DonarError::Timeout {
            operation: "response wait".to_string(),
            ms: 15000,
        };
        assert!(err.to_string().contains("15000ms"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DonarError = io.into();
        assert!(matches!(err, DonarError::Io(_)));
    }
}
