//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter turns them into the
//! `{"messages": [...], "statusCode": n}` envelope; the domain only decides
//! which category a failure belongs to and which messages explain it.

use std::fmt;

use super::TraceId;

/// Failure category, used by adapters to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Local validation rejected the request before any I/O happened.
    InvalidRequest,
    /// A locally owned record does not exist.
    NotFound,
    /// An upstream answered with an error status; the status is mirrored.
    Upstream(u16),
    /// Anything that could not be classified.
    InternalError,
}

impl ErrorCode {
    /// HTTP status an adapter should report for this category.
    ///
    /// # Examples
    /// ```
    /// use movies_backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::Upstream(503).status(), 503);
    /// assert_eq!(ErrorCode::NotFound.status(), 404);
    /// ```
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::Upstream(status) => status,
            Self::InternalError => 500,
        }
    }
}

/// Error value returned by every driving port.
///
/// Messages keep the order they were supplied in; validation failures pass
/// them pre-sorted so responses are stable.
///
/// # Examples
/// ```
/// use movies_backend::domain::{Error, ErrorCode};
///
/// let err = Error::validation(vec!["b".to_owned(), "a".to_owned()]);
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.messages(), ["b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    messages: Vec<String>,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Build an error with a single message, capturing the ambient trace id.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_messages(code, vec![message.into()])
    }

    /// Build an error carrying several messages.
    pub fn with_messages(code: ErrorCode, messages: Vec<String>) -> Self {
        Self {
            code,
            messages,
            trace_id: TraceId::current(),
        }
    }

    /// Local validation failure listing every violated rule.
    pub fn validation(messages: Vec<String>) -> Self {
        Self::with_messages(ErrorCode::InvalidRequest, messages)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Upstream failure mirrored with its original status and message.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream(status), message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable messages in reporting order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Trace identifier captured when the error was raised.
    #[must_use]
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

impl std::error::Error for Error {}
