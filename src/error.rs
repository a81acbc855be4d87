use std::time::Duration;
use thiserror::Error;

/// Errors raised while building selectors or resolving them against a driver
#[derive(Error, Debug)]
pub enum SelectorError {
    /// A required argument was blank or otherwise unusable
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: &'static str, reason: String },

    /// No element matched the selector
    #[error("No element found for selector '{0}'")]
    NotFound(String),

    /// The search context cannot reach a script-capable driver
    #[error("Search context does not wrap a driver capable of executing scripts")]
    UnsupportedContext,

    /// An external library did not become ready in time
    #[error("Timed out after {waited:?} waiting for {library} to load")]
    Timeout { library: String, waited: Duration },

    /// A script returned a value of an unexpected shape
    #[error("Unexpected script result: expected {expected}, got {actual}")]
    UnexpectedResult { expected: &'static str, actual: String },

    /// Error raised by the underlying driver, passed through untouched
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),
}

impl SelectorError {
    /// Shorthand for [`SelectorError::InvalidArgument`]
    pub fn invalid_argument(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }

    /// Wrap a driver-side error
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Driver(err.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SelectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = SelectorError::invalid_argument("selector", "must not be blank");
        assert_eq!(err.to_string(), "Invalid argument 'selector': must not be blank");
    }

    #[test]
    fn test_driver_error_is_transparent() {
        let err = SelectorError::driver("javascript error: foo is not defined");
        assert_eq!(err.to_string(), "javascript error: foo is not defined");
    }

    #[test]
    fn test_timeout_message() {
        let err = SelectorError::Timeout {
            library: "jQuery".to_string(),
            waited: Duration::from_secs(3),
        };
        assert!(err.to_string().contains("jQuery"));
        assert!(err.to_string().contains("3s"));
    }
}
