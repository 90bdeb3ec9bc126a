//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::MovieInfo`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MovieInfo)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieInfoSchema {
    /// Upstream identifier.
    #[schema(example = "abc")]
    id: String,
    /// Display title. Requests may also use the legacy `name` field.
    #[schema(example = "Batman Begins")]
    title: String,
    /// Release year.
    #[schema(example = 2005, minimum = 1800, maximum = 2200)]
    year: i32,
    /// Principal cast members.
    #[schema(example = json!(["Christian Bale", "Michael Caine"]))]
    cast: Vec<String>,
    /// Release date, when known.
    #[schema(value_type = Option<String>, format = Date, example = "2005-06-15")]
    release_date: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Review`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Review)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    /// Store-assigned identifier.
    #[schema(example = "0e3c3fb6-4d4f-4a5e-9b7e-2f1d2c0f5a11")]
    id: Option<String>,
    /// Reviewed movie. Requests may also use the legacy `infoId` field.
    #[schema(example = "abc")]
    movie_info_id: String,
    /// Free-text comment.
    #[schema(example = "Awesome Movie")]
    comment: String,
    /// Score between 0 and 10 inclusive.
    #[schema(example = 9.0, minimum = 0, maximum = 10)]
    rating: f64,
}

/// OpenAPI schema for [`crate::domain::Movie`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Movie)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieSchema {
    /// Metadata from the movie-info upstream.
    info: MovieInfoSchema,
    /// Reviews from the reviews upstream; may be empty.
    reviews: Vec<ReviewSchema>,
}
