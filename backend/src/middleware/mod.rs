//! Request middleware.
//!
//! Purpose: lifecycle concerns shared by both services, currently request
//! tracing.

pub mod trace;

pub use trace::Trace;
