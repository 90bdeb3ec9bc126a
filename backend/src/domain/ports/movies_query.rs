//! Driving port for movie aggregation reads.

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::{Error, Movie, MovieInfo};

/// Domain use-case port for reading aggregated movies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoviesQuery: Send + Sync {
    /// Combine one movie's info with all of its reviews.
    ///
    /// `Ok(None)` when the info upstream has no record for `movie_info_id`.
    async fn movie_by_id(&self, movie_info_id: &str) -> Result<Option<Movie>, Error>;

    /// Relay the info upstream's live feed.
    fn movie_info_stream(&self) -> BoxStream<'static, Result<MovieInfo, Error>>;
}

/// Fixture query that knows no movies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMoviesQuery;

#[async_trait]
impl MoviesQuery for FixtureMoviesQuery {
    async fn movie_by_id(&self, _movie_info_id: &str) -> Result<Option<Movie>, Error> {
        Ok(None)
    }

    fn movie_info_stream(&self) -> BoxStream<'static, Result<MovieInfo, Error>> {
        stream::empty().boxed()
    }
}
