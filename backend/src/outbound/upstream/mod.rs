//! Reqwest-backed adapters for the movie-info and reviews upstreams.
//!
//! Adapters own transport details only: URL building, status mapping into
//! [`crate::domain::ports::UpstreamError`], body decoding, and applying the
//! shared [`crate::domain::Retrier`]. They contain no aggregation logic.

mod client;
mod movie_info_http_source;
mod ndjson;
mod review_http_source;
mod status;

pub use client::{UpstreamClientError, UpstreamHttp};
pub use movie_info_http_source::MovieInfoHttpSource;
pub use review_http_source::ReviewHttpSource;
