//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Scenarios ran and some did not pass
    #[error("{failed} of {total} scenarios did not pass")]
    ScenarioFailures {
        /// Failed or skipped scenarios
        failed: usize,
        /// Scenarios run
        total: usize,
    },

    /// Lint found errors
    #[error("lint found {errors} error(s)")]
    Lint {
        /// Number of errors
        errors: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nestcheck library error
    #[error("{0}")]
    Check(#[from] nestcheck::CheckError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("no browser");
        assert!(err.to_string().contains("no browser"));
    }

    #[test]
    fn test_scenario_failures_message() {
        let err = CliError::ScenarioFailures {
            failed: 2,
            total: 6,
        };
        assert_eq!(err.to_string(), "2 of 6 scenarios did not pass");
    }

    #[test]
    fn test_from_check_error() {
        let err: CliError = nestcheck::CheckError::config("bad url").into();
        assert!(matches!(err, CliError::Check(_)));
        assert!(err.to_string().contains("bad url"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = io.into();
        assert!(err.to_string().contains("missing"));
    }
}
