//! Review records and their validation rules.
//!
//! Validation is an explicit function returning every violated rule rather
//! than the first one, sorted so clients (and tests) see a stable order.

use serde::{Deserialize, Serialize};

/// Inclusive rating bounds.
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

const MOVIE_INFO_ID_EMPTY: &str = "review.movieInfoId must not be empty.";
const COMMENT_EMPTY: &str = "review.comment must not be empty.";
const RATING_OUT_OF_RANGE: &str = "review.rating must be a value between 0 and 10";
const RATING_MISSING: &str = "review.rating must be present";

/// Persisted (or upstream-provided) review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned identifier; absent until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Movie info this review belongs to.
    #[serde(alias = "infoId")]
    pub movie_info_id: String,
    /// Free-text comment.
    pub comment: String,
    /// Score in [`RATING_RANGE`].
    pub rating: f64,
}

/// Unvalidated review submitted for creation.
///
/// # Examples
/// ```
/// use movies_backend::domain::NewReview;
///
/// let draft = NewReview {
///     movie_info_id: String::new(),
///     comment: "Great".to_owned(),
///     rating: Some(11.0),
/// };
/// assert_eq!(
///     draft.violations(),
///     [
///         "review.movieInfoId must not be empty.",
///         "review.rating must be a value between 0 and 10",
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// Target movie info id.
    pub movie_info_id: String,
    /// Free-text comment.
    pub comment: String,
    /// Requested score; `None` when the client omitted it.
    pub rating: Option<f64>,
}

impl NewReview {
    /// Every rule this draft breaks, sorted lexicographically.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.movie_info_id.is_empty() {
            messages.push(MOVIE_INFO_ID_EMPTY.to_owned());
        }
        if self.comment.is_empty() {
            messages.push(COMMENT_EMPTY.to_owned());
        }
        match self.rating {
            None => messages.push(RATING_MISSING.to_owned()),
            Some(rating) => messages.extend(rating_violation(rating).map(str::to_owned)),
        }
        messages.sort();
        messages
    }

    /// Attach a store identifier. Callers must have checked [`Self::violations`].
    pub(crate) fn into_review(self, id: String, rating: f64) -> Review {
        Review {
            id: Some(id),
            movie_info_id: self.movie_info_id,
            comment: self.comment,
            rating,
        }
    }
}

/// Range message when `rating` falls outside [`RATING_RANGE`] (NaN included).
#[must_use]
pub fn rating_violation(rating: f64) -> Option<&'static str> {
    if RATING_RANGE.contains(&rating) {
        None
    } else {
        Some(RATING_OUT_OF_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(movie_info_id: &str, comment: &str, rating: Option<f64>) -> NewReview {
        NewReview {
            movie_info_id: movie_info_id.to_owned(),
            comment: comment.to_owned(),
            rating,
        }
    }

    #[rstest]
    #[case::lower_bound(0.0)]
    #[case::upper_bound(10.0)]
    #[case::fractional(5.5)]
    fn accepts_ratings_inside_the_range(#[case] rating: f64) {
        assert!(draft("m1", "ok", Some(rating)).violations().is_empty());
    }

    #[rstest]
    #[case::negative(-0.1)]
    #[case::above(10.1)]
    #[case::not_a_number(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_ratings_outside_the_range(#[case] rating: f64) {
        assert_eq!(
            draft("m1", "ok", Some(rating)).violations(),
            [RATING_OUT_OF_RANGE]
        );
    }

    #[test]
    fn reports_every_violation_sorted() {
        assert_eq!(
            draft("", "", Some(-1.0)).violations(),
            [COMMENT_EMPTY, MOVIE_INFO_ID_EMPTY, RATING_OUT_OF_RANGE]
        );
    }

    #[test]
    fn missing_rating_is_a_violation() {
        assert_eq!(draft("m1", "ok", None).violations(), [RATING_MISSING]);
    }

    #[test]
    fn accepts_info_id_alias_when_decoding() {
        let review: Review =
            serde_json::from_str(r#"{"infoId":"m1","comment":"c","rating":1.5}"#).expect("decode");
        assert_eq!(review.movie_info_id, "m1");
        assert!(review.id.is_none());
    }
}
