//! Status endpoints

use axum::{
    extract::{Json as JsonBody, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::params::parse_status_id;
use crate::AppState;
use crate::api::dto::StatusResponse;
use crate::auth::CurrentAccount;
use crate::data::NewStatus;
use crate::error::AppError;

/// Create status request
#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub status: String,
}

/// POST /api/v1/statuses
pub async fn create_status(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    body: Result<JsonBody<CreateStatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let JsonBody(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let status = state
        .db
        .statuses()
        .create(&NewStatus {
            account_id: account.id,
            content: request.status,
        })
        .await?;

    Ok(Json(status.into()))
}

/// GET /api/v1/statuses/:id
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_status_id(&id)?;
    let status = state.db.statuses().retrieve(id).await?;
    Ok(Json(status.into()))
}

/// DELETE /api/v1/statuses/:id
///
/// The store delete is idempotent; the 404 comes from the lookup here.
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_status_id(&id)?;
    let statuses = state.db.statuses();

    statuses.retrieve(id).await?;
    statuses.delete(id).await?;

    Ok(StatusCode::OK)
}
