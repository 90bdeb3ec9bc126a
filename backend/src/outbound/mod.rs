//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **upstream**: `reqwest` clients for the movie-info and reviews services
//! - **persistence**: review storage
//!
//! Adapters are thin translators between domain types and their transport or
//! storage representations. They contain no business logic.

pub mod persistence;
pub mod upstream;
