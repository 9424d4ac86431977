//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use modelserve_core::NumericArray;

use crate::pages;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predictdata", get(predict_form).post(predict_datapoint))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .fallback(fallback)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(pages::INDEX_PAGE)
}

async fn predict_form() -> Html<&'static str> {
    Html(pages::FORM_PAGE)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Accepted prediction payload: either `{"input": [[..]]}` or a bare 2-D array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictPayload {
    Wrapped { input: NumericArray },
    Bare(NumericArray),
}

impl PredictPayload {
    fn into_input(self) -> NumericArray {
        match self {
            Self::Wrapped { input } => input,
            Self::Bare(input) => input,
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: Vec<f64>,
}

/// Data-submission handler for `POST /predictdata`.
///
/// Bodies that do not carry a JSON numeric payload (empty form posts
/// included) are accepted and answered with an empty 200, preserving the
/// historical behavior of this route. A numeric payload is scaled, run
/// through the model, and answered with a structured prediction.
async fn predict_datapoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    metrics::counter!("modelserve_requests_total").increment(1);

    let payload: PredictPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            debug!("no numeric payload on /predictdata, returning empty response");
            return Ok(StatusCode::OK.into_response());
        }
    };

    let input = payload.into_input();
    info!(samples = input.num_rows(), "running prediction");

    let start = std::time::Instant::now();
    let scaled = state.scaler.transform(&input)?;
    let output = state.model.predict(&scaled)?;

    metrics::histogram!("modelserve_predict_latency_us")
        .record(start.elapsed().as_micros() as f64);
    metrics::counter!("modelserve_predictions_total").increment(1);

    Ok(Json(PredictResponse {
        prediction: output.flatten(),
    })
    .into_response())
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
        error!("prediction failed: {}", message);

        let body = json!({
            "error": {
                "message": message,
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
