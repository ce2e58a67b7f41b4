//! Shared error type across hostgate crates.

use thiserror::Error;

/// Stable error codes (printed by the admin binary, asserted by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Request kind ordinal outside the compiled set.
    InvalidRequestKind,
    /// Backing row store failed.
    Storage,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidRequestKind => "INVALID_REQUEST_KIND",
            ErrorCode::Storage => "STORAGE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HostGateError>;

/// Unified error type used by core and store.
#[derive(Debug, Error)]
pub enum HostGateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid request kind ordinal: {0}")]
    InvalidRequestKind(usize),
    #[error("storage: {0}")]
    Storage(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HostGateError {
    /// Map error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            HostGateError::BadRequest(_) => ErrorCode::BadRequest,
            HostGateError::InvalidRequestKind(_) => ErrorCode::InvalidRequestKind,
            HostGateError::Storage(_) => ErrorCode::Storage,
            HostGateError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            HostGateError::Internal(_) => ErrorCode::Internal,
        }
    }
}
