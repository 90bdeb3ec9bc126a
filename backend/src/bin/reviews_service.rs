//! Review store service entry-point.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use movies_backend::inbound::http::health::HealthState;
use movies_backend::server::{ReviewsSettings, create_reviews_server, reviews_state};

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

    let settings = ReviewsSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(std::io::Error::other)?;
    let state = reviews_state(settings.broadcast_capacity());

    let health_state = web::Data::new(HealthState::new());
    let server = create_reviews_server(health_state.clone(), state, bind_addr)?;
    info!(%bind_addr, "reviews service listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
