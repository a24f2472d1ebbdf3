//! Server crate for the content recommender.
//!
//! This crate contains the service that owns the built similarity index,
//! answers queries from shared snapshots and swaps in rebuilt indexes.

pub mod service;

pub use service::{RecommenderService, ServiceConfig};
