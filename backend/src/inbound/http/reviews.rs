//! Review store HTTP handlers.
//!
//! ```text
//! POST   /v1/reviews
//! GET    /v1/reviews?movieInfoId=abc
//! GET    /v1/reviews/stream
//! PUT    /v1/reviews/{id}
//! DELETE /v1/reviews/{id}
//! GET    /v1/helloworld
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{Removal, ReviewFilter};
use crate::domain::{Error, NewReview, Review};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::ndjson::live_ndjson;
use crate::inbound::http::schemas::ReviewSchema;
use crate::inbound::http::state::ReviewsHttpState;

/// Message returned when a rating change omits the rating.
pub const RATING_REQUIRED: &str = "[rating] cannot be null";

/// Request body for `POST /v1/reviews`.
///
/// Missing strings deserialise as empty so every violated rule is reported
/// together rather than failing on the first absent field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Reviewed movie; `infoId` is accepted as an alias.
    #[serde(default, alias = "infoId")]
    pub movie_info_id: String,
    #[serde(default)]
    pub comment: String,
    pub rating: Option<f64>,
}

impl From<ReviewRequest> for NewReview {
    fn from(value: ReviewRequest) -> Self {
        Self {
            movie_info_id: value.movie_info_id,
            comment: value.comment,
            rating: value.rating,
        }
    }
}

/// Request body for `PUT /v1/reviews/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RatingChangeRequest {
    pub rating: Option<f64>,
}

/// Query string for `GET /v1/reviews`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewsListQuery {
    /// Restrict results to one movie.
    pub movie_info_id: Option<String>,
}

/// Create a review.
#[utoipa::path(
    post,
    path = "/v1/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Stored review", body = ReviewSchema),
        (status = 400, description = "Validation failed", body = ErrorPayload)
    ),
    tags = ["reviews"],
    operation_id = "addReview"
)]
#[post("/reviews")]
pub async fn add_review(
    state: web::Data<ReviewsHttpState>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let review = state.reviews.add(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(review))
}

/// List reviews, optionally for one movie.
#[utoipa::path(
    get,
    path = "/v1/reviews",
    params(ReviewsListQuery),
    responses(
        (status = 200, description = "Stored reviews", body = [ReviewSchema])
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<ReviewsHttpState>,
    query: web::Query<ReviewsListQuery>,
) -> ApiResult<web::Json<Vec<Review>>> {
    let filter = ReviewFilter {
        movie_info_id: query.into_inner().movie_info_id,
    };
    Ok(web::Json(state.reviews_query.list(filter).await?))
}

/// Live NDJSON feed of created reviews, starting with the most recent one.
#[utoipa::path(
    get,
    path = "/v1/reviews/stream",
    responses(
        (status = 200, description = "Newline-delimited reviews",
            content_type = "application/x-ndjson", body = ReviewSchema)
    ),
    tags = ["reviews"],
    operation_id = "streamReviews"
)]
#[get("/reviews/stream")]
pub async fn review_stream(state: web::Data<ReviewsHttpState>) -> HttpResponse {
    live_ndjson(state.reviews_query.stream_created())
}

/// Replace a review's rating.
#[utoipa::path(
    put,
    path = "/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    request_body = RatingChangeRequest,
    responses(
        (status = 200, description = "Updated review", body = ReviewSchema),
        (status = 400, description = "Rating missing or out of range", body = ErrorPayload),
        (status = 404, description = "No review with this id")
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/reviews/{id}")]
pub async fn update_review(
    state: web::Data<ReviewsHttpState>,
    path: web::Path<String>,
    payload: web::Json<RatingChangeRequest>,
) -> ApiResult<HttpResponse> {
    let rating = payload
        .into_inner()
        .rating
        .ok_or_else(|| Error::invalid_request(RATING_REQUIRED))?;
    let review_id = path.into_inner();
    Ok(match state.reviews.update_rating(&review_id, rating).await? {
        Some(review) => HttpResponse::Ok().json(review),
        None => HttpResponse::NotFound().finish(),
    })
}

/// Delete a review.
#[utoipa::path(
    delete,
    path = "/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "No review with this id")
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<ReviewsHttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    Ok(match state.reviews.remove(&path.into_inner()).await? {
        Removal::Removed => HttpResponse::NoContent().finish(),
        Removal::Absent => HttpResponse::NotFound().finish(),
    })
}

/// Connectivity check.
#[utoipa::path(
    get,
    path = "/v1/helloworld",
    responses((status = 200, description = "Greeting", body = String)),
    tags = ["reviews"],
    operation_id = "helloWorld"
)]
#[get("/helloworld")]
pub async fn hello_world() -> &'static str {
    "Hello World!"
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
