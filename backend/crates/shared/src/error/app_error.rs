//! Application Error
//!
//! [`AppError`] is what leaves the process when a feature crate gives up on
//! a request. The HTTP rendering lives in `conversions`.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Caller-facing error with an optional hint and a private cause.
///
/// The `cause` is reachable through [`Error::source`] and `Debug` for logs,
/// but is never rendered into a response.
///
/// ```rust
/// use kernel::error::app_error::AppError;
/// use std::error::Error;
///
/// let err = AppError::internal("Failed to record survey submission")
///     .with_action("Retry the submission later")
///     .with_source(std::io::Error::other("disk full"));
///
/// assert_eq!(err.status_code(), 500);
/// assert_eq!(err.action(), Some("Retry the submission later"));
/// assert!(err.source().is_some());
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    cause: Option<BoxedCause>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            cause: None,
        }
    }

    /// Shorthand for [`ErrorKind::InternalServerError`]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// What the caller can do about it
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_source<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}
