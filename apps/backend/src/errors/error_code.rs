//! Error codes surfaced in error views and the `x-error-code` header.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No auth cookie on a protected route
    Unauthorized,
    /// Token failed signature or format checks
    UnauthorizedInvalidJwt,
    /// Token is past its expiry
    UnauthorizedExpiredJwt,
    /// Unknown user or wrong password
    InvalidCredentials,

    // Request validation
    ValidationError,
    BadRequest,

    // Resources
    NotFound,

    // Conflicts
    DuplicateUser,
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::NotFound => "NOT_FOUND",

            Self::DuplicateUser => "DUPLICATE_USER",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
