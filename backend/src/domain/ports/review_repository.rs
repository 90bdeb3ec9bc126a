//! Port for review persistence.
//!
//! The [`ReviewRepository`] trait is the storage contract behind the review
//! store. Records are keyed by their `id`; saving a record whose id already
//! exists replaces it.

use async_trait::async_trait;

use crate::domain::Review;

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review repository query failed: {message}",
    }
}

/// Selection applied when listing reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Restrict results to one movie; `None` lists every review.
    pub movie_info_id: Option<String>,
}

impl ReviewFilter {
    /// Filter matching every review.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching reviews of one movie.
    #[must_use]
    pub fn for_movie(movie_info_id: impl Into<String>) -> Self {
        Self {
            movie_info_id: Some(movie_info_id.into()),
        }
    }

    /// Whether `review` passes this filter.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        self.movie_info_id
            .as_deref()
            .is_none_or(|id| review.movie_info_id == id)
    }
}

/// Port for review storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fetch one review by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, ReviewRepositoryError>;

    /// List reviews passing `filter`, in insertion order.
    async fn find(&self, filter: &ReviewFilter) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Insert or replace `review`, returning the stored record.
    ///
    /// Callers assign the id before saving.
    async fn save(&self, review: &Review) -> Result<Review, ReviewRepositoryError>;

    /// Remove the review with `id`. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), ReviewRepositoryError>;
}

/// Fixture repository that stores nothing.
///
/// Lookups return nothing and saves echo the given record back. Use it in
/// unit tests where persistence behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn find_by_id(&self, _id: &str) -> Result<Option<Review>, ReviewRepositoryError> {
        Ok(None)
    }

    async fn find(&self, _filter: &ReviewFilter) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, review: &Review) -> Result<Review, ReviewRepositoryError> {
        Ok(review.clone())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), ReviewRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn review(movie: &str) -> Review {
        Review {
            id: Some("r1".to_owned()),
            movie_info_id: movie.to_owned(),
            comment: "Awesome Movie".to_owned(),
            rating: 9.0,
        }
    }

    #[rstest]
    #[case::unfiltered(ReviewFilter::all(), "m1", true)]
    #[case::same_movie(ReviewFilter::for_movie("m1"), "m1", true)]
    #[case::other_movie(ReviewFilter::for_movie("m1"), "m2", false)]
    fn filter_matches_by_movie(
        #[case] filter: ReviewFilter,
        #[case] movie: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(&review(movie)), expected);
    }

    #[tokio::test]
    async fn fixture_repository_echoes_saves_and_finds_nothing() {
        let repo = FixtureReviewRepository;
        let saved = repo.save(&review("m1")).await.expect("fixture save");

        assert_eq!(saved, review("m1"));
        assert!(repo.find_by_id("r1").await.expect("lookup").is_none());
        assert!(repo.find(&ReviewFilter::all()).await.expect("list").is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let error = ReviewRepositoryError::query("lock poisoned");
        assert_eq!(error.to_string(), "review repository query failed: lock poisoned");
    }
}
