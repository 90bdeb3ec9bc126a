//! Movie aggregation and review store backend.
//!
//! Two services share this library: the movies service composes movie info
//! with reviews fetched from upstream HTTP providers, and the reviews service
//! stores reviews and announces new ones on a live feed.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::{MoviesApiDoc, ReviewsApiDoc};
pub use domain::TraceId;
pub use middleware::Trace;
