//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod movies;
pub mod ndjson;
pub mod reviews;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
