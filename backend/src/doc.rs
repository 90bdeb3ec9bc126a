//! OpenAPI documentation configuration.
//!
//! Each service publishes its own document:
//!
//! - [`MoviesApiDoc`]: movie aggregation endpoints and health probes
//! - [`ReviewsApiDoc`]: review store endpoints and health probes
//!
//! Domain types are described through the wrappers in
//! [`crate::inbound::http::schemas`] so the domain stays free of utoipa.
//! Swagger UI serves the documents in debug builds only.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::reviews::{RatingChangeRequest, ReviewRequest};
use crate::inbound::http::schemas::{MovieInfoSchema, MovieSchema, ReviewSchema};

/// OpenAPI document for the movie aggregation service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies service API",
        description = "Movie details combined from the movie-info and reviews upstreams."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::get_movie,
        crate::inbound::http::movies::movie_stream,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(MovieSchema, MovieInfoSchema, ReviewSchema, ErrorPayload)),
    tags(
        (name = "movies", description = "Aggregated movie lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct MoviesApiDoc;

/// OpenAPI document for the review store service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reviews service API",
        description = "Review storage with a live feed of newly created reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::reviews::add_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::review_stream,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::reviews::hello_world,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ReviewSchema, ReviewRequest, RatingChangeRequest, ErrorPayload)),
    tags(
        (name = "reviews", description = "Review storage"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ReviewsApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying both documents register their endpoints and schemas.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const REVIEW_SCHEMA_NAME: &str = "crate.domain.Review";
    const MOVIE_SCHEMA_NAME: &str = "crate.domain.Movie";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn movies_document_lists_movie_paths() {
        let doc = MoviesApiDoc::openapi();
        for path in ["/v1/movies/{id}", "/v1/movies/stream", "/health/ready"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(MOVIE_SCHEMA_NAME).expect("Movie"), "reviews");
    }

    #[test]
    fn reviews_document_lists_review_paths() {
        let doc = ReviewsApiDoc::openapi();
        for path in [
            "/v1/reviews",
            "/v1/reviews/{id}",
            "/v1/reviews/stream",
            "/v1/helloworld",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(
            schemas.get(REVIEW_SCHEMA_NAME).expect("Review"),
            "movieInfoId",
        );
    }
}
