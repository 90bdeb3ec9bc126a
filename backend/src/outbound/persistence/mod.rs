//! Review persistence adapters.
//!
//! The review store keeps its records in process memory; the
//! [`crate::domain::ports::ReviewRepository`] port is the seam where a
//! durable store would plug in.

mod in_memory_review_repository;

pub use in_memory_review_repository::InMemoryReviewRepository;
