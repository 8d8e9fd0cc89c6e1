//! Error Kind
//!
//! The handful of outcomes a request can end in, each pinned to one HTTP
//! status.

use std::fmt;

/// Classification carried by every [`AppError`](super::app_error::AppError).
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
/// assert_eq!(ErrorKind::UnprocessableEntity.to_string(), "Unprocessable Entity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The body could not be read as the expected media type
    BadRequest,
    /// The body parsed but its content was rejected
    UnprocessableEntity,
    /// Failure the caller can do nothing about
    InternalServerError,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError => 500,
        }
    }

    /// Reason phrase, used as the problem `title`
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
