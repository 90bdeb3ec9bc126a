//! Status and transport failure mapping shared by upstream adapters.

use reqwest::StatusCode;

use crate::domain::ports::{Upstream, UpstreamError};

/// Appended to the message of every 5xx failure.
pub(super) const SERVER_DOWN_SUFFIX: &str = " [server_down: try again!]";

/// Classify a non-success `status`, using `message` as the caller-facing text.
pub(super) fn map_status_error(upstream: Upstream, status: StatusCode, message: &str) -> UpstreamError {
    if status.is_server_error() {
        UpstreamError::server(upstream, status.as_u16(), format!("{message}{SERVER_DOWN_SUFFIX}"))
    } else if status.is_client_error() {
        UpstreamError::client(upstream, status.as_u16(), message)
    } else {
        UpstreamError::transport(
            upstream,
            format!("unexpected status {}: {message}", status.as_u16()),
        )
    }
}

pub(super) fn map_transport_error(upstream: Upstream, error: &reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::transport(upstream, format!("request timed out: {error}"))
    } else {
        UpstreamError::transport(upstream, error.to_string())
    }
}
