//! HTTP request handlers.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::storage::{FetchEvent, TargetDescription};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterTargetRequest {
    pub url: String,
    /// Missing means zero, which is rejected.
    #[serde(default)]
    pub interval: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetIdResponse {
    pub id: u32,
}

fn parse_id(raw: &str) -> ApiResult<u32> {
    raw.parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid target id: {raw:?}")))
}

// ============================================================================
// API: Targets
// ============================================================================

pub async fn handle_get_targets(State(state): State<AppState>) -> Json<Vec<TargetDescription>> {
    Json(state.store.list())
}

pub async fn handle_register_target(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<TargetIdResponse>> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    })?;

    let req: RegisterTargetRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid request body: {e}")))?;

    let id = state.store.register(&req.url, req.interval)?;
    Ok(Json(TargetIdResponse { id }))
}

pub async fn handle_delete_target(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TargetIdResponse>> {
    let id = parse_id(&id)?;
    let removed = state.store.delete(id)?;
    Ok(Json(TargetIdResponse { id: removed.id }))
}

// ============================================================================
// API: History
// ============================================================================

pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<FetchEvent>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_history(id)?))
}
