//! Movie aggregation service entry-point.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use movies_backend::inbound::http::health::HealthState;
use movies_backend::server::{MoviesSettings, create_movies_server, movies_state, upstream_clients};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = MoviesSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(std::io::Error::other)?;
    let (info_client, reviews_client) = upstream_clients(&settings)?;
    let state = movies_state(info_client, reviews_client);

    let health_state = web::Data::new(HealthState::new());
    let server = create_movies_server(health_state.clone(), state, bind_addr)?;
    info!(%bind_addr, "movies service listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
