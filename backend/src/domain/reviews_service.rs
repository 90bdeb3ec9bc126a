//! Review store service.
//!
//! Implements [`ReviewsCommand`] and [`ReviewsQuery`] over a
//! [`ReviewRepository`], and announces every stored review on a shared
//! [`ReviewBroadcast`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    Removal, ReviewFilter, ReviewRepository, ReviewRepositoryError, ReviewsCommand, ReviewsQuery,
};
use crate::domain::{Error, NewReview, Review, ReviewBroadcast, rating_violation};

/// Review store service implementing the review driving ports.
#[derive(Clone)]
pub struct ReviewsService<R> {
    repository: Arc<R>,
    broadcast: Arc<ReviewBroadcast>,
}

impl<R> ReviewsService<R> {
    /// Create a service over `repository`, publishing to `broadcast`.
    pub fn new(repository: Arc<R>, broadcast: Arc<ReviewBroadcast>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }
}

fn map_repository_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::internal(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ReviewsCommand for ReviewsService<R>
where
    R: ReviewRepository,
{
    async fn add(&self, draft: NewReview) -> Result<Review, Error> {
        let violations = draft.violations();
        let rating = match (violations.is_empty(), draft.rating) {
            (true, Some(rating)) => rating,
            _ => return Err(Error::validation(violations)),
        };

        let review = draft.into_review(Uuid::new_v4().to_string(), rating);
        let saved = self
            .repository
            .save(&review)
            .await
            .map_err(map_repository_error)?;
        info!(review_id = ?saved.id, movie_info_id = %saved.movie_info_id, "review created");
        self.broadcast.publish(saved.clone());
        Ok(saved)
    }

    async fn update_rating(&self, id: &str, rating: f64) -> Result<Option<Review>, Error> {
        if let Some(message) = rating_violation(rating) {
            return Err(Error::validation(vec![message.to_owned()]));
        }

        let Some(mut review) = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
        else {
            return Ok(None);
        };

        review.rating = rating;
        let saved = self
            .repository
            .save(&review)
            .await
            .map_err(map_repository_error)?;
        Ok(Some(saved))
    }

    async fn remove(&self, id: &str) -> Result<Removal, Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if existing.is_none() {
            return Ok(Removal::Absent);
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        info!(review_id = id, "review deleted");
        Ok(Removal::Removed)
    }
}

#[async_trait]
impl<R> ReviewsQuery for ReviewsService<R>
where
    R: ReviewRepository,
{
    async fn list(&self, filter: ReviewFilter) -> Result<Vec<Review>, Error> {
        self.repository
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }

    fn stream_created(&self) -> BoxStream<'static, Review> {
        self.broadcast.subscribe()
    }
}

#[cfg(test)]
#[path = "reviews_service_tests.rs"]
mod tests;
