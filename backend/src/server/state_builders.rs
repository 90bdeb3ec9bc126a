//! Builders wiring outbound adapters and domain services into HTTP state.

use std::io;
use std::sync::Arc;

use crate::domain::{MoviesService, Retrier, ReviewBroadcast, ReviewsService};
use crate::inbound::http::state::{MoviesHttpState, ReviewsHttpState};
use crate::outbound::persistence::InMemoryReviewRepository;
use crate::outbound::upstream::{MovieInfoHttpSource, ReviewHttpSource, UpstreamHttp};

use super::MoviesSettings;

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {error}"))
}

/// Build upstream clients from validated settings.
///
/// Both clients share one retry policy.
///
/// # Errors
/// Returns [`io::Error`] when an upstream URL is missing or unusable.
pub fn upstream_clients(settings: &MoviesSettings) -> io::Result<(UpstreamHttp, UpstreamHttp)> {
    let retrier = Retrier::new(settings.retry_policy());
    let timeout = settings.request_timeout();
    let info_url = settings
        .movie_info_url()
        .map_err(|e| startup_error("movie info upstream", e))?;
    let reviews_url = settings
        .reviews_url()
        .map_err(|e| startup_error("reviews upstream", e))?;

    let info = UpstreamHttp::new(info_url, timeout, retrier.clone())
        .map_err(|e| startup_error("movie info upstream", e))?;
    let reviews = UpstreamHttp::new(reviews_url, timeout, retrier)
        .map_err(|e| startup_error("reviews upstream", e))?;
    Ok((info, reviews))
}

/// Compose the aggregation service over the two upstream clients.
#[must_use]
pub fn movies_state(info: UpstreamHttp, reviews: UpstreamHttp) -> MoviesHttpState {
    let service = MoviesService::new(
        Arc::new(MovieInfoHttpSource::new(info)),
        Arc::new(ReviewHttpSource::new(reviews)),
    );
    MoviesHttpState::new(Arc::new(service))
}

/// Review store backed by the in-memory repository and a live feed buffering
/// `broadcast_capacity` records per subscriber.
#[must_use]
pub fn reviews_state(broadcast_capacity: usize) -> ReviewsHttpState {
    let service = Arc::new(ReviewsService::new(
        Arc::new(InMemoryReviewRepository::new()),
        Arc::new(ReviewBroadcast::new(broadcast_capacity)),
    ));
    ReviewsHttpState::new(service.clone(), service)
}
