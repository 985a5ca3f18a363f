//! Error types for targeting queries.
//!
//! Classification is shared with the loader and CLI layers so they can decide
//! whether to retry next tick, report bad input, or give up.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same query may succeed on a later tick.
    ///
    /// Examples: viewer not spawned yet
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: inverted distance range, unknown option name
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,

    /// Unrecoverable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Uniform classification for targeting errors.
pub trait ClassifiedError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by targeting queries and settings parsing.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TargetingError {
    /// The local player is not available (not spawned, or between worlds).
    #[error("no viewer entity available")]
    NoViewer,

    /// Distance window is empty or not a number.
    #[error("invalid distance range ({lower}, {upper}]")]
    InvalidRange { lower: f64, upper: f64 },

    /// Option name did not match any enemy switch.
    #[error("unknown enemy option '{0}'")]
    UnknownOption(String),
}

impl ClassifiedError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoViewer => ErrorSeverity::Recoverable,
            Self::InvalidRange { .. } | Self::UnknownOption(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoViewer => "TARGETING_NO_VIEWER",
            Self::InvalidRange { .. } => "TARGETING_INVALID_RANGE",
            Self::UnknownOption(_) => "TARGETING_UNKNOWN_OPTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_viewer_is_recoverable() {
        let error = TargetingError::NoViewer;
        assert!(error.severity().is_recoverable());
        assert_eq!(error.error_code(), "TARGETING_NO_VIEWER");
    }

    #[test]
    fn bad_input_is_validation() {
        let error = TargetingError::InvalidRange {
            lower: 4.0,
            upper: 1.0,
        };
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.to_string(), "invalid distance range (4, 1]");
    }
}
