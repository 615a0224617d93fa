// 🌐 HTTP API
// POST /receipts/process and GET /receipts/:id/points on top of axum

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        DefaultBodyLimit, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::scoring::receipt_points;
use crate::store::{InMemoryPointsStore, PointsStore};
use crate::validation::parse_receipt;

pub const INVALID_RECEIPT_DESCRIPTION: &str = "The receipt is invalid";
pub const NOT_FOUND_DESCRIPTION: &str = "No receipt found for that id";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PointsStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PointsStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPointsStore::new()))
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub description: String,
}

/// Errors a caller can observe. Each maps to one status and one fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidReceipt,
    NotFound,
}

impl ApiError {
    fn status(self) -> StatusCode {
        match self {
            ApiError::InvalidReceipt => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn description(self) -> &'static str {
        match self {
            ApiError::InvalidReceipt => INVALID_RECEIPT_DESCRIPTION,
            ApiError::NotFound => NOT_FOUND_DESCRIPTION,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            description: self.description().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Validate, score and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        debug!(%rejection, "rejected receipt body");
        ApiError::InvalidReceipt
    })?;

    let receipt = parse_receipt(&body).map_err(|e| {
        debug!(field = e.field(), error = %e, "invalid receipt");
        ApiError::InvalidReceipt
    })?;

    let points = receipt_points(&receipt);
    let id = state.store.put(points);
    info!(%id, points, "receipt processed");

    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Look up the points awarded to a receipt
async fn get_points(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PointsResponse>, ApiError> {
    // Malformed and unknown ids are reported the same way, including
    // segments that do not even decode to UTF-8
    let Path(id) = path.map_err(|rejection| {
        debug!(%rejection, "rejected receipt id");
        ApiError::NotFound
    })?;
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound)?;

    state
        .store
        .get(&id)
        .map(|points| Json(PointsResponse { points }))
        .ok_or(ApiError::NotFound)
}

// ============================================================================
// Router
// ============================================================================

/// Build the service router around `state`
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
