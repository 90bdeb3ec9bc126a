//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`MovieInfoSource`], [`ReviewSource`], [`ReviewRepository`])
//! are implemented by outbound adapters. Driving ports ([`MoviesQuery`],
//! [`ReviewsCommand`], [`ReviewsQuery`]) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod movie_info_source;
mod movies_query;
mod review_repository;
mod review_source;
mod reviews_command;
mod reviews_query;
mod upstream_error;

#[cfg(test)]
pub use movie_info_source::MockMovieInfoSource;
pub use movie_info_source::{FixtureMovieInfoSource, MovieInfoSource};
#[cfg(test)]
pub use movies_query::MockMoviesQuery;
pub use movies_query::{FixtureMoviesQuery, MoviesQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{
    FixtureReviewRepository, ReviewFilter, ReviewRepository, ReviewRepositoryError,
};
#[cfg(test)]
pub use review_source::MockReviewSource;
pub use review_source::{FixtureReviewSource, ReviewSource};
#[cfg(test)]
pub use reviews_command::MockReviewsCommand;
pub use reviews_command::{FixtureReviewsCommand, Removal, ReviewsCommand};
#[cfg(test)]
pub use reviews_query::MockReviewsQuery;
pub use reviews_query::{FixtureReviewsQuery, ReviewsQuery};
pub use upstream_error::{Upstream, UpstreamError};
