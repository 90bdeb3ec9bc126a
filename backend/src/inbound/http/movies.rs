//! Movie aggregation HTTP handlers.
//!
//! ```text
//! GET /v1/movies/{id}
//! GET /v1/movies/stream
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::ndjson::fallible_ndjson;
use crate::inbound::http::schemas::{MovieInfoSchema, MovieSchema};
use crate::inbound::http::state::MoviesHttpState;

/// Relay the movie-info upstream's live feed as NDJSON.
#[utoipa::path(
    get,
    path = "/v1/movies/stream",
    responses(
        (status = 200, description = "Newline-delimited movie info records",
            content_type = "application/x-ndjson", body = MovieInfoSchema),
        (status = "4XX", description = "Upstream rejected the request", body = ErrorPayload),
        (status = "5XX", description = "Upstream failed after retries", body = ErrorPayload)
    ),
    tags = ["movies"],
    operation_id = "streamMovieInfo"
)]
#[get("/movies/stream")]
pub async fn movie_stream(state: web::Data<MoviesHttpState>) -> ApiResult<HttpResponse> {
    fallible_ndjson(state.movies.movie_info_stream()).await
}

/// Fetch a movie's info together with all of its reviews.
///
/// Upstream failures are reported with the upstream's own status code.
#[utoipa::path(
    get,
    path = "/v1/movies/{id}",
    params(("id" = String, Path, description = "Movie info identifier")),
    responses(
        (status = 200, description = "Movie with reviews", body = MovieSchema),
        (status = 404, description = "No movie info with this id"),
        (status = "4XX", description = "Upstream rejected the request", body = ErrorPayload),
        (status = "5XX", description = "Upstream failed after retries", body = ErrorPayload)
    ),
    tags = ["movies"],
    operation_id = "getMovie"
)]
#[get("/movies/{id}")]
pub async fn get_movie(
    state: web::Data<MoviesHttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let movie_info_id = path.into_inner();
    Ok(match state.movies.movie_by_id(&movie_info_id).await? {
        Some(movie) => HttpResponse::Ok().json(movie),
        None => HttpResponse::NotFound().finish(),
    })
}
