//! Driving port for review store mutations.
//!
//! HTTP handlers call [`ReviewsCommand`] to create, re-rate and delete
//! reviews; validation happens behind the port so every adapter gets the same
//! rules.

use async_trait::async_trait;

use crate::domain::{Error, NewReview, Review};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// A record existed and was deleted.
    Removed,
    /// No record had the requested id; nothing changed.
    Absent,
}

/// Domain use-case port for changing stored reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsCommand: Send + Sync {
    /// Validate and store a new review, then announce it to live subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] carrying every
    /// violated rule, sorted, when the draft is invalid. Nothing is stored in
    /// that case.
    async fn add(&self, draft: NewReview) -> Result<Review, Error>;

    /// Replace the rating of an existing review.
    ///
    /// `Ok(None)` when no review has `id`. Only the rating changes.
    async fn update_rating(&self, id: &str, rating: f64) -> Result<Option<Review>, Error>;

    /// Delete the review with `id` if it exists.
    async fn remove(&self, id: &str) -> Result<Removal, Error>;
}

/// Fixture command that accepts everything and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewsCommand;

#[async_trait]
impl ReviewsCommand for FixtureReviewsCommand {
    async fn add(&self, draft: NewReview) -> Result<Review, Error> {
        let rating = draft.rating.unwrap_or_default();
        Ok(draft.into_review("fixture".to_owned(), rating))
    }

    async fn update_rating(&self, _id: &str, _rating: f64) -> Result<Option<Review>, Error> {
        Ok(None)
    }

    async fn remove(&self, _id: &str) -> Result<Removal, Error> {
        Ok(Removal::Absent)
    }
}
