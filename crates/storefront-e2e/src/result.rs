//! Result and error types for storefront-e2e.

use thiserror::Error;

/// Result type for storefront-e2e operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum E2eError {
    /// A locator target never reached the required state within its bound
    #[error("Timed out after {ms}ms waiting for {target} to be {state}")]
    ActionabilityTimeout {
        /// Human-readable description of the target
        target: String,
        /// State that was awaited (attached, visible, actionable, ...)
        state: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// A strict locator matched more than one element
    #[error("Strict mode violation: {selector} resolved to {count} elements")]
    StrictModeViolation {
        /// Selector description
        selector: String,
        /// Number of matching elements
        count: usize,
    },

    /// The element went away between probing and acting on it
    #[error("Element detached from the DOM: {selector}")]
    ElementDetached {
        /// Selector description
        selector: String,
    },

    /// Text read from the page did not match the expected format
    #[error("Could not parse {expected} from {text:?}")]
    Parse {
        /// What was expected (price, quantity, ...)
        expected: &'static str,
        /// The offending text
        text: String,
    },

    /// Web-first assertion did not pass before its timeout
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// A raw value outside the sort option enumeration
    #[error("Invalid sort option {value:?}; expected one of az, za, lohi, hilo")]
    InvalidSortOption {
        /// The rejected raw value
        value: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Error reported by the browser-automation engine
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Operation attempted on a session that was already torn down
    #[error("Session {id} is closed")]
    SessionClosed {
        /// Session identifier
        id: String,
    },

    /// Test body exceeded the per-test timeout
    #[error("Test '{name}' timed out after {ms}ms")]
    TestTimeout {
        /// Test name
        name: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl E2eError {
    /// Whether a wait loop may swallow this error and poll again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ElementDetached { .. })
    }

    /// Whether this error is a timeout of any kind
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ActionabilityTimeout { .. } | Self::TestTimeout { .. }
        )
    }

    pub(crate) fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_detached_is_retryable() {
        let detached = E2eError::ElementDetached {
            selector: ".cart_item".into(),
        };
        assert!(detached.is_retryable());

        let timeout = E2eError::ActionabilityTimeout {
            target: "#checkout".into(),
            state: "visible".into(),
            ms: 10,
        };
        assert!(!timeout.is_retryable());
        assert!(timeout.is_timeout());
    }

    #[test]
    fn test_display_names_the_target() {
        let err = E2eError::ActionabilityTimeout {
            target: "#finish".into(),
            state: "actionable".into(),
            ms: 250,
        };
        let text = err.to_string();
        assert!(text.contains("#finish"));
        assert!(text.contains("250ms"));
    }

    #[test]
    fn test_invalid_sort_option_message() {
        let err = E2eError::InvalidSortOption {
            value: "price".into(),
        };
        assert!(err.to_string().contains("\"price\""));
    }
}
