//! modelserve inference service
//!
//! Resolves a named, versioned classifier from a local model registry at
//! startup and exposes a single `classify` call that forwards numeric input
//! to the runner unchanged.

pub mod routes;
pub mod service;

pub use service::InferenceService;
