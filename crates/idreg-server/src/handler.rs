use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use idreg_gate::GateStatus;
use idreg_service::RegistryService;
use idreg_types::IdentifierRecord;

use crate::error::ServerError;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RegistryService>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub owner: String,
    #[serde(default)]
    pub table: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SecretRequest {
    pub secret: String,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: GateStatus,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub preview_id: String,
}

pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<IdentifierRecord>, ServerError> {
    let record = state.service.generate(&req.owner, req.table.as_deref())?;
    Ok(Json(record))
}

pub async fn confirm_handler(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<AckResponse>, ServerError> {
    state.service.confirm(&req.id)?;
    Ok(Json(AckResponse { ok: true }))
}

pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IdentifierRecord>, ServerError> {
    let record = state.service.lookup(&id)?;
    Ok(Json(record))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ServerError> {
    state.service.delete(&id)?;
    Ok(Json(AckResponse { ok: true }))
}

pub async fn suspend_handler(
    State(state): State<AppState>,
    Json(req): Json<SecretRequest>,
) -> Result<Json<AckResponse>, ServerError> {
    state.service.suspend(&req.secret)?;
    Ok(Json(AckResponse { ok: true }))
}

pub async fn resume_handler(
    State(state): State<AppState>,
    Json(req): Json<SecretRequest>,
) -> Result<Json<AckResponse>, ServerError> {
    state.service.resume(&req.secret)?;
    Ok(Json(AckResponse { ok: true }))
}

/// Never gated: operators poll this while the registry is suspended.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: state.service.health(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Dry-run of the generator; nothing is inserted.
pub async fn preview_handler(
    State(state): State<AppState>,
) -> Result<Json<PreviewResponse>, ServerError> {
    let preview_id = state.service.preview()?;
    Ok(Json(PreviewResponse { preview_id }))
}
