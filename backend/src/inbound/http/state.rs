//! Shared HTTP adapter state.
//!
//! HTTP handlers accept these bundles via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMoviesQuery, FixtureReviewsCommand, FixtureReviewsQuery, MoviesQuery, ReviewsCommand,
    ReviewsQuery,
};

/// Dependency bundle for the movie aggregation handlers.
#[derive(Clone)]
pub struct MoviesHttpState {
    pub movies: Arc<dyn MoviesQuery>,
}

impl MoviesHttpState {
    /// Wrap the aggregation port.
    pub fn new(movies: Arc<dyn MoviesQuery>) -> Self {
        Self { movies }
    }
}

impl Default for MoviesHttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureMoviesQuery))
    }
}

/// Dependency bundle for the review store handlers.
#[derive(Clone)]
pub struct ReviewsHttpState {
    pub reviews: Arc<dyn ReviewsCommand>,
    pub reviews_query: Arc<dyn ReviewsQuery>,
}

impl ReviewsHttpState {
    /// Wrap the command and query ports.
    pub fn new(reviews: Arc<dyn ReviewsCommand>, reviews_query: Arc<dyn ReviewsQuery>) -> Self {
        Self {
            reviews,
            reviews_query,
        }
    }
}

impl Default for ReviewsHttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureReviewsCommand), Arc::new(FixtureReviewsQuery))
    }
}
