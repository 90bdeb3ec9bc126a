//! Failures reported by the upstream HTTP clients.

use std::fmt;

use crate::domain::{Classify, Error, ErrorClassification};

/// Which upstream produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    /// Movie-info provider.
    MovieInfo,
    /// Reviews provider.
    Reviews,
}

impl Upstream {
    /// Stable label used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MovieInfo => "movie_info",
            Self::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified upstream failure.
///
/// `Client` and `Server` carry the status and message that callers receive
/// verbatim; `Transport` and `Decode` never reached a meaningful status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered 4xx.
    #[error("{message}")]
    Client {
        upstream: Upstream,
        status: u16,
        message: String,
    },
    /// Upstream answered 5xx.
    #[error("{message}")]
    Server {
        upstream: Upstream,
        status: u16,
        message: String,
    },
    /// Connection, timeout, or body transfer failure.
    #[error("{upstream} transport failed: {message}")]
    Transport { upstream: Upstream, message: String },
    /// Response body did not match the expected shape.
    #[error("{upstream} response decode failed: {message}")]
    Decode { upstream: Upstream, message: String },
}

impl UpstreamError {
    /// Helper for 4xx responses.
    pub fn client(upstream: Upstream, status: u16, message: impl Into<String>) -> Self {
        Self::Client {
            upstream,
            status,
            message: message.into(),
        }
    }

    /// Helper for 5xx responses.
    pub fn server(upstream: Upstream, status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            upstream,
            status,
            message: message.into(),
        }
    }

    /// Helper for transport failures.
    pub fn transport(upstream: Upstream, message: impl Into<String>) -> Self {
        Self::Transport {
            upstream,
            message: message.into(),
        }
    }

    /// Helper for undecodable bodies.
    pub fn decode(upstream: Upstream, message: impl Into<String>) -> Self {
        Self::Decode {
            upstream,
            message: message.into(),
        }
    }

    /// Upstream that produced the failure.
    #[must_use]
    pub fn upstream(&self) -> Upstream {
        match self {
            Self::Client { upstream, .. }
            | Self::Server { upstream, .. }
            | Self::Transport { upstream, .. }
            | Self::Decode { upstream, .. } => *upstream,
        }
    }

    /// Originating HTTP status, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

impl Classify for UpstreamError {
    fn classification(&self) -> ErrorClassification {
        match self {
            Self::Client { .. } => ErrorClassification::ClientError,
            Self::Server { .. } => ErrorClassification::ServerError,
            Self::Transport { .. } | Self::Decode { .. } => ErrorClassification::Unclassified,
        }
    }

    fn origin(&self) -> Option<&'static str> {
        Some(self.upstream().as_str())
    }
}

impl From<UpstreamError> for Error {
    fn from(value: UpstreamError) -> Self {
        match value {
            UpstreamError::Client {
                status, message, ..
            }
            | UpstreamError::Server {
                status, message, ..
            } => Error::upstream(status, message),
            other @ (UpstreamError::Transport { .. } | UpstreamError::Decode { .. }) => {
                Error::internal(other.to_string())
            }
        }
    }
}
