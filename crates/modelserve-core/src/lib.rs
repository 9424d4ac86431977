//! Core types shared by the modelserve serving surfaces.
//!
//! This crate holds the numeric payload type exchanged with models and the
//! common error type used across the workspace.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::NumericArray;
