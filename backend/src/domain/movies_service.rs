//! Movie aggregation service.
//!
//! Implements [`MoviesQuery`] by combining one record from the movie-info
//! upstream with every review the reviews upstream holds for it. Retry and
//! status mapping live in the outbound adapters; this layer only decides
//! ordering and how failures surface.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::domain::ports::{MovieInfoSource, MoviesQuery, ReviewSource, UpstreamError};
use crate::domain::{Error, Movie, MovieInfo, Review};

/// Aggregating service implementing the movies driving port.
#[derive(Clone)]
pub struct MoviesService<I, R> {
    info_source: Arc<I>,
    review_source: Arc<R>,
}

impl<I, R> MoviesService<I, R> {
    /// Create a service over the two upstream sources.
    pub fn new(info_source: Arc<I>, review_source: Arc<R>) -> Self {
        Self {
            info_source,
            review_source,
        }
    }
}

fn surface(error: UpstreamError) -> Error {
    warn!(upstream = %error.upstream(), status = ?error.status(), error = %error, "upstream call failed");
    Error::from(error)
}

#[async_trait]
impl<I, R> MoviesQuery for MoviesService<I, R>
where
    I: MovieInfoSource,
    R: ReviewSource,
{
    async fn movie_by_id(&self, movie_info_id: &str) -> Result<Option<Movie>, Error> {
        let Some(info) = self
            .info_source
            .fetch_by_id(movie_info_id)
            .await
            .map_err(surface)?
        else {
            debug!(movie_info_id, "no movie info; skipping reviews");
            return Ok(None);
        };

        let reviews: Vec<Review> = self
            .review_source
            .fetch_by_movie_info_id(movie_info_id)
            .try_collect()
            .await
            .map_err(surface)?;

        Ok(Some(Movie { info, reviews }))
    }

    fn movie_info_stream(&self) -> BoxStream<'static, Result<MovieInfo, Error>> {
        self.info_source.stream_all().map_err(surface).boxed()
    }
}

#[cfg(test)]
#[path = "movies_service_tests.rs"]
mod tests;
