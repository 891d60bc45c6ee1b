//! Error taxonomy for the noon-report core.
//!
//! Schema errors indicate a catalog/registry mismatch and should never occur
//! with a validated static catalog. Session errors are recoverable: the user
//! picks another report type, edits a value, or resubmits. Completion errors
//! come from the external text-completion collaborator and never crash the
//! session.

use thiserror::Error;

/// Configuration/schema lookup failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown section '{name}'")]
    UnknownSection { name: String },

    #[error("Unknown report type '{name}'")]
    UnknownReportType { name: String },
}

/// Recoverable failures of session operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Report type '{candidate}' may not follow '{last}'")]
    SequenceViolation { candidate: String, last: String },

    #[error(
        "Fuel ROB mismatch: individual tanks sum to {calculated:.1} MT \
         but Total Fuel ROB is {reported:.1} MT"
    )]
    RobMismatch { calculated: f64, reported: f64 },

    #[error("No report is currently being drafted")]
    NoActiveReport,

    #[error("A '{report_type}' report is already in progress")]
    ReportInProgress { report_type: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failures of the external text-completion endpoint.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Completion API error: {0}")]
    Api(String),

    #[error("Authentication error: missing or invalid API key")]
    Authentication,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type SessionResult<T> = Result<T, SessionError>;
pub type CompletionResult<T> = Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::UnknownSection {
            name: "Ballast".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown section 'Ballast'");
    }

    #[test]
    fn test_rob_mismatch_display() {
        let err = SessionError::RobMismatch {
            calculated: 812.35,
            reported: 815.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("812.3"));
        assert!(msg.contains("815.0"));
    }

    #[test]
    fn test_schema_error_converts_to_session_error() {
        let err: SessionError = SchemaError::UnknownReportType {
            name: "Afternoon".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::Schema(_)));
    }
}
