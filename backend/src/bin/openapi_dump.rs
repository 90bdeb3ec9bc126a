//! Print a service's OpenAPI document as JSON.

use clap::{Parser, ValueEnum};
use movies_backend::{MoviesApiDoc, ReviewsApiDoc};
use utoipa::OpenApi;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Service {
    Movies,
    Reviews,
}

/// Dump the OpenAPI document for one service.
#[derive(Debug, Parser)]
struct Args {
    /// Service whose document is printed.
    #[arg(value_enum, default_value_t = Service::Movies)]
    service: Service,
}

fn main() -> Result<(), serde_json::Error> {
    let doc = match Args::parse().service {
        Service::Movies => MoviesApiDoc::openapi(),
        Service::Reviews => ReviewsApiDoc::openapi(),
    };
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
