//! HTTP surface for the inference service

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use modelserve_core::NumericArray;

use crate::service::InferenceService;

pub fn create_router(service: Arc<InferenceService>) -> Router {
    Router::new()
        .route("/classify", post(classify))
        .route("/health", get(health_check))
        .fallback(fallback)
        .with_state(service)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// `POST /classify`: numeric array in, numeric array out.
///
/// Any failure raised by the runner propagates here and surfaces as a
/// server error; the service itself translates nothing.
async fn classify(
    State(service): State<Arc<InferenceService>>,
    Json(input): Json<NumericArray>,
) -> Result<Json<NumericArray>, AppError> {
    info!(samples = input.num_rows(), "classify request");
    let output = service.classify(&input)?;
    Ok(Json(output))
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    Model(modelserve_core::Error),
}

impl From<modelserve_core::Error> for AppError {
    fn from(err: modelserve_core::Error) -> Self {
        AppError::Model(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::Model(err) => err.to_string(),
        };
        error!("classify failed: {}", message);

        let body = json!({
            "error": {
                "message": message,
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
