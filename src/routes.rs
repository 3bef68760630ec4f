use crate::server::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use mission_match::error::AppError;
use mission_match::workflows::allocation::{
    AllocationConfig, AllocationEngine, AllocationOutcome, Assignment, Conflict, ExcludedRow,
    RawRow, Snapshot,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Row collections keyed by the data-source column names.
#[derive(Debug, Deserialize)]
pub(crate) struct AllocationRequest {
    #[serde(default)]
    pub(crate) pilots: Vec<RawRow>,
    #[serde(default)]
    pub(crate) drones: Vec<RawRow>,
    #[serde(default)]
    pub(crate) missions: Vec<RawRow>,
    #[serde(default)]
    pub(crate) config: Option<AllocationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AllocationResponse {
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) conflicts: Vec<Conflict>,
    pub(crate) excluded_rows: Vec<ExcludedRow>,
}

impl AllocationResponse {
    pub(crate) fn new(snapshot: Snapshot, outcome: AllocationOutcome) -> Self {
        Self {
            assignments: outcome.assignments,
            conflicts: outcome.conflicts,
            excluded_rows: snapshot.excluded,
        }
    }
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/allocations", post(allocations_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn allocations_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AllocationRequest>,
) -> Result<Json<AllocationResponse>, AppError> {
    let AllocationRequest {
        pilots,
        drones,
        missions,
        config,
    } = payload;

    let config = config.unwrap_or(state.allocation);
    config.scoring.validate()?;

    let engine = AllocationEngine::new(config);
    let (snapshot, outcome) = engine.allocate(&pilots, &drones, &missions)?;

    Ok(Json(AllocationResponse::new(snapshot, outcome)))
}
