//! Domain primitives, services and ports.
//!
//! Purpose: define the movie, review and error types shared by both
//! services, the retry runtime used by upstream clients, and the services
//! implementing the driving ports. Nothing here knows about HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with its category.
//! - MovieInfo / Movie / Review / NewReview: wire-compatible records.
//! - RetryPolicy / Retrier: bounded fixed-delay retry for calls and streams.
//! - ReviewBroadcast: live feed of newly created reviews.
//! - MoviesService / ReviewsService: driving port implementations.

pub mod error;
pub mod movie;
mod movies_service;
pub mod ports;
pub mod retry;
pub mod review;
pub mod review_broadcast;
mod reviews_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::movie::{Movie, MovieInfo};
pub use self::movies_service::MoviesService;
pub use self::retry::{
    Classify, ErrorClassification, Retrier, RetryPolicy, RetrySleeper, TokioSleeper,
};
pub use self::review::{NewReview, RATING_RANGE, Review, rating_violation};
pub use self::review_broadcast::{DEFAULT_BROADCAST_CAPACITY, ReviewBroadcast};
pub use self::reviews_service::ReviewsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
