//! In-memory `ReviewRepository` implementation.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::Review;
use crate::domain::ports::{ReviewFilter, ReviewRepository, ReviewRepositoryError};

/// Insertion-ordered review store guarded by an async read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, ReviewRepositoryError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .find(|review| review.id.as_deref() == Some(id))
            .cloned())
    }

    async fn find(&self, filter: &ReviewFilter) -> Result<Vec<Review>, ReviewRepositoryError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .filter(|review| filter.matches(review))
            .cloned()
            .collect())
    }

    async fn save(&self, review: &Review) -> Result<Review, ReviewRepositoryError> {
        let Some(id) = review.id.as_deref() else {
            return Err(ReviewRepositoryError::query("review id must be assigned before save"));
        };

        let mut reviews = self.reviews.write().await;
        match reviews
            .iter_mut()
            .find(|existing| existing.id.as_deref() == Some(id))
        {
            Some(existing) => *existing = review.clone(),
            None => reviews.push(review.clone()),
        }
        debug!(review_id = id, total = reviews.len(), "review saved");
        Ok(review.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), ReviewRepositoryError> {
        let mut reviews = self.reviews.write().await;
        reviews.retain(|review| review.id.as_deref() != Some(id));
        Ok(())
    }
}
