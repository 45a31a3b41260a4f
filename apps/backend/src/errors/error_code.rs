//! Error codes for the classroom API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// Malformed request body
    BadRequest,
    /// Request body over the size limit
    PayloadTooLarge,

    // Resource Not Found
    /// No classroom with the given code
    ClassroomNotFound,
    /// No route matched the request
    RouteNotFound,

    // Business Logic Conflicts
    /// Classroom code already in use
    ClassroomCodeConflict,

    // System Errors
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::ClassroomNotFound => "CLASSROOM_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::ClassroomCodeConflict => "CLASSROOM_CODE_CONFLICT",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
