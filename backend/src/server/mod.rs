//! Server construction and middleware wiring for both services.

mod config;
mod state_builders;

pub use config::{MoviesSettings, ReviewsSettings, SettingsError};
pub use state_builders::{movies_state, reviews_state, upstream_clients};

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{MoviesApiDoc, ReviewsApiDoc};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::movies::{get_movie, movie_stream};
use crate::inbound::http::reviews::{
    add_review, delete_review, hello_world, list_reviews, review_stream, update_review,
};
use crate::inbound::http::state::{MoviesHttpState, ReviewsHttpState};

/// Payload extractor configuration rendering malformed input as 400 envelopes.
fn payload_configs() -> (web::JsonConfig, web::QueryConfig) {
    (
        web::JsonConfig::default().error_handler(json_error_handler),
        web::QueryConfig::default().error_handler(query_error_handler),
    )
}

/// Application for the movie aggregation service.
///
/// `/v1/movies/stream` is registered ahead of `/v1/movies/{id}` so the literal
/// segment wins.
pub fn build_movies_app(
    health_state: web::Data<HealthState>,
    state: web::Data<MoviesHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (json, query) = payload_configs();
    let api = web::scope("/v1").service(movie_stream).service(get_movie);

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json)
        .app_data(query)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", MoviesApiDoc::openapi()),
    );

    app
}

/// Application for the review store service.
pub fn build_reviews_app(
    health_state: web::Data<HealthState>,
    state: web::Data<ReviewsHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (json, query) = payload_configs();
    let api = web::scope("/v1")
        .service(review_stream)
        .service(add_review)
        .service(list_reviews)
        .service(update_review)
        .service(delete_review)
        .service(hello_world);

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json)
        .app_data(query)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ReviewsApiDoc::openapi()),
    );

    app
}

/// Bind the movie aggregation service.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_movies_server(
    health_state: web::Data<HealthState>,
    state: MoviesHttpState,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let state = web::Data::new(state);
    let server =
        HttpServer::new(move || build_movies_app(server_health_state.clone(), state.clone()))
            .bind(bind_addr)?
            .run();

    health_state.mark_ready();
    Ok(server)
}

/// Bind the review store service.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_reviews_server(
    health_state: web::Data<HealthState>,
    state: ReviewsHttpState,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let state = web::Data::new(state);
    let server =
        HttpServer::new(move || build_reviews_app(server_health_state.clone(), state.clone()))
            .bind(bind_addr)?
            .run();

    health_state.mark_ready();
    Ok(server)
}
