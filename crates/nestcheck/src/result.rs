//! Result and error types for nestcheck.

use thiserror::Error;

/// Result type for nestcheck operations
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that can occur while driving the calculator
#[derive(Debug, Error)]
pub enum CheckError {
    /// Navigation to the target page failed
    #[error("Navigation to {url} failed: {message}")]
    NavigationFailure {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Element never became ready for interaction
    #[error("Element '{locator}' not interactable after {timeout_ms}ms")]
    ElementNotInteractable {
        /// Semantic locator name
        locator: String,
        /// Wait budget that was exhausted
        timeout_ms: u64,
    },

    /// Element is absent from the page
    #[error("Element '{locator}' not found")]
    ElementNotFound {
        /// Semantic locator name
        locator: String,
    },

    /// Option parameter outside the allowed set
    #[error("Unknown {field} option '{value}' (expected one of: {allowed})")]
    UnknownOption {
        /// Which option was being selected
        field: &'static str,
        /// Value that was rejected
        value: String,
        /// Accepted values, comma separated
        allowed: &'static str,
    },

    /// Scenario key missing from a test-data store
    #[error("Scenario '{key}' not found in {store} test data")]
    ScenarioNotFound {
        /// Store name
        store: String,
        /// Scenario key
        key: String,
    },

    /// Scenario record lacks a field an operation needs
    #[error("Scenario '{key}' has no '{field}' field")]
    FieldMissing {
        /// Scenario key
        key: String,
        /// Field name
        field: String,
    },

    /// Expected vs. actual mismatch
    #[error("Assertion failed on '{locator}': expected {expected:?}, got {actual:?}")]
    AssertionFailed {
        /// Semantic locator name
        locator: String,
        /// Expected value
        expected: String,
        /// Actual value
        actual: String,
    },

    /// Step text matched no binding
    #[error("Undefined step: {text}")]
    UndefinedStep {
        /// Step text
        text: String,
    },

    /// Step text matched more than one binding
    #[error("Ambiguous step '{text}' matches: {}", .patterns.join(", "))]
    AmbiguousStep {
        /// Step text
        text: String,
        /// Patterns that matched
        patterns: Vec<String>,
    },

    /// Malformed feature file
    #[error("Feature parse error at line {line}: {message}")]
    FeatureParse {
        /// 1-based line number
        line: usize,
        /// Error message
        message: String,
    },

    /// Feature file rejected by the Gherkin parser
    #[error("Gherkin syntax error: {message}")]
    Gherkin {
        /// Parser message, including the position
        message: String,
    },

    /// Unclassified browser driver failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Configuration error
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

impl CheckError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(
        locator: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AssertionFailed {
            locator: locator.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Whether the error must abort the whole run rather than one scenario
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::NavigationFailure { .. } | Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_message() {
        let err = CheckError::UnknownOption {
            field: "marital status",
            value: "divorced".to_string(),
            allowed: "single, married",
        };
        let msg = err.to_string();
        assert!(msg.contains("divorced"));
        assert!(msg.contains("single, married"));
    }

    #[test]
    fn test_assertion_message_carries_both_sides() {
        let err = CheckError::assertion("required field alert", "Please fill", "");
        let msg = err.to_string();
        assert!(msg.contains("\"Please fill\""));
        assert!(msg.contains("required field alert"));
    }

    #[test]
    fn test_ambiguous_lists_patterns() {
        let err = CheckError::AmbiguousStep {
            text: "x".to_string(),
            patterns: vec!["^a$".to_string(), "^b$".to_string()],
        };
        assert!(err.to_string().ends_with("^a$, ^b$"));
    }

    #[test]
    fn test_fatal_classification() {
        let nav = CheckError::NavigationFailure {
            url: "https://example.com".to_string(),
            message: "dns".to_string(),
        };
        assert!(nav.is_fatal());
        assert!(CheckError::config("bad").is_fatal());
        assert!(!CheckError::driver("boom").is_fatal());
        assert!(!CheckError::ScenarioNotFound {
            store: "positive".to_string(),
            key: "nope".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CheckError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
