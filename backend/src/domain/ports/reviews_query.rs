//! Driving port for review store reads.

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::{Error, Review};

use super::ReviewFilter;

/// Domain use-case port for reading stored reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsQuery: Send + Sync {
    /// List stored reviews passing `filter`.
    async fn list(&self, filter: ReviewFilter) -> Result<Vec<Review>, Error>;

    /// Live feed of reviews created from now on, starting with the most
    /// recently created one. Never ends on its own.
    fn stream_created(&self) -> BoxStream<'static, Review>;
}

/// Fixture query with an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewsQuery;

#[async_trait]
impl ReviewsQuery for FixtureReviewsQuery {
    async fn list(&self, _filter: ReviewFilter) -> Result<Vec<Review>, Error> {
        Ok(Vec::new())
    }

    fn stream_created(&self) -> BoxStream<'static, Review> {
        stream::empty().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_lists_nothing() {
        let query = FixtureReviewsQuery;
        let reviews = query.list(ReviewFilter::all()).await.expect("list");
        assert!(reviews.is_empty());
    }
}
