//! modelserve prediction endpoint
//!
//! HTTP serving surface for the pre-trained regression model and its
//! feature scaler. Both artifacts are deserialized once at startup and
//! injected into the request handlers through [`state::AppState`].

pub mod config;
pub mod pages;
pub mod routes;
pub mod state;
