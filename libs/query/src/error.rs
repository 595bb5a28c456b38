//! Error types shared across the query core.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors surfaced by query compilation and execution.
///
/// Every variant carries a numeric status via [`Error::status`] so the
/// transport layer can map it without matching on variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Field does not exist: {0}")]
    UnknownField(String),

    #[error("External database does not exist: {0}")]
    UnknownEntity(String),

    #[error("No matching data in database {0}")]
    NoMatchingRecord(String),

    #[error("Require \"{action} {subject}\" permission")]
    PermissionDenied { subject: String, action: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid query: {0}")]
    BackendValidation(String),

    #[error("Backend fault ({status}): {message}")]
    BackendFault { status: u16, message: String },

    #[error("Query cancelled")]
    Cancelled,
}

impl Error {
    pub fn permission_denied(subject: impl Into<String>, action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            subject: subject.into(),
            action: action.into(),
        }
    }

    /// Numeric status for the transport layer.
    ///
    /// Fault-class backend errors keep the status the backend reported;
    /// everything else is a client-class failure except cancellation.
    pub fn status(&self) -> u16 {
        match self {
            Self::Parse(_) => 422,
            Self::UnknownField(_)
            | Self::UnknownEntity(_)
            | Self::NoMatchingRecord(_)
            | Self::PermissionDenied { .. }
            | Self::Validation(_)
            | Self::BackendValidation(_) => 400,
            Self::BackendFault { status, .. } => *status,
            Self::Cancelled => 499,
        }
    }

    /// True for server-class failures that must not be masked.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::BackendFault { .. })
    }
}
