//! Driven port for the reviews upstream.

use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::Review;

use super::UpstreamError;

/// Port for reading reviews of one movie from the upstream provider.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewSource: Send + Sync {
    /// Stream every review recorded against `movie_info_id`.
    ///
    /// An upstream "not found" is reported as an empty stream rather than an
    /// error.
    fn fetch_by_movie_info_id(
        &self,
        movie_info_id: &str,
    ) -> BoxStream<'static, Result<Review, UpstreamError>>;
}

/// Fixture source serving a fixed set of reviews.
#[derive(Debug, Clone, Default)]
pub struct FixtureReviewSource {
    reviews: Vec<Review>,
}

impl FixtureReviewSource {
    /// Serve the given records.
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }
}

impl ReviewSource for FixtureReviewSource {
    fn fetch_by_movie_info_id(
        &self,
        movie_info_id: &str,
    ) -> BoxStream<'static, Result<Review, UpstreamError>> {
        let matching: Vec<_> = self
            .reviews
            .iter()
            .filter(|review| review.movie_info_id == movie_info_id)
            .cloned()
            .map(Ok)
            .collect();
        stream::iter(matching).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;

    #[tokio::test]
    async fn fixture_filters_by_movie() {
        let review = |id: &str, movie: &str| Review {
            id: Some(id.to_owned()),
            movie_info_id: movie.to_owned(),
            comment: "ok".to_owned(),
            rating: 7.0,
        };
        let source = FixtureReviewSource::new(vec![
            review("r1", "m1"),
            review("r2", "m2"),
            review("r3", "m1"),
        ]);

        let found: Vec<Review> = source
            .fetch_by_movie_info_id("m1")
            .try_collect()
            .await
            .expect("stream");

        let ids: Vec<_> = found.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, ["r1", "r3"]);
    }
}
