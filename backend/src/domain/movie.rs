//! Movie info records and the composed movie view.
//!
//! `MovieInfo` is owned by the movie-info upstream; this service only reads
//! it. `Movie` exists for the duration of one aggregation request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Review;

/// Canonical movie metadata as served by the movie-info upstream.
///
/// The movie-info upstream owns the record invariants (`year` within
/// 1800..=2200, a non-empty `cast`). Decoding does not re-check them;
/// records are passed through exactly as received.
///
/// # Examples
/// ```
/// use movies_backend::domain::MovieInfo;
///
/// let info: MovieInfo = serde_json::from_str(
///     r#"{"id":"m1","name":"Sul Più Bello","year":2020,"cast":["Ludovica Francesconi"]}"#,
/// )
/// .expect("legacy `name` field is accepted");
/// assert_eq!(info.title, "Sul Più Bello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    /// Upstream identifier.
    pub id: String,
    /// Display title.
    #[serde(alias = "name")]
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Principal cast members.
    pub cast: Vec<String>,
    /// Release date when the upstream knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

/// Movie info together with every review the reviews upstream returned for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Metadata fetched from the movie-info upstream.
    pub info: MovieInfo,
    /// Reviews in upstream order; may be empty.
    pub reviews: Vec<Review>,
}
