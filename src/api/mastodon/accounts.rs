//! Account and relationship endpoints

use axum::{
    extract::{Json as JsonBody, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::params::{LimitParams, PaginationParams};
use crate::AppState;
use crate::api::dto::{AccountResponse, RelationshipResponse, to_responses};
use crate::auth::CurrentAccount;
use crate::data::NewAccount;
use crate::error::AppError;
use crate::service::RelationshipService;

/// Account creation request
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
}

/// POST /api/v1/accounts
pub async fn create_account(
    State(state): State<AppState>,
    body: Result<JsonBody<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let JsonBody(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let account = state
        .db
        .accounts()
        .create(&NewAccount {
            username: request.username,
            display_name: request.display_name,
            note: request.note,
        })
        .await?;

    Ok(Json(account.into()))
}

/// GET /api/v1/accounts/:username
pub async fn get_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.db.accounts().retrieve(&username).await?;
    Ok(Json(account.into()))
}

/// POST /api/v1/accounts/:username/follow
pub async fn follow_account(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(username): Path<String>,
) -> Result<Json<RelationshipResponse>, AppError> {
    let edge = RelationshipService::new(state.db.clone())
        .follow(&actor, &username)
        .await?;

    Ok(Json(edge.into()))
}

/// POST /api/v1/accounts/:username/unfollow
pub async fn unfollow_account(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    RelationshipService::new(state.db.clone())
        .unfollow(&actor, &username)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /api/v1/accounts/relationships
///
/// Every edge touching the authenticated account.
pub async fn get_relationships(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
) -> Result<Json<Vec<RelationshipResponse>>, AppError> {
    let edges = RelationshipService::new(state.db.clone())
        .relationships(&actor)
        .await?;

    Ok(Json(to_responses(edges)))
}

/// GET /api/v1/accounts/:username/following
///
/// Only `limit` is honoured here.
pub async fn get_account_following(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let limit = params.parse()?;
    let accounts = RelationshipService::new(state.db.clone())
        .following(&username, limit)
        .await?;

    Ok(Json(to_responses(accounts)))
}

/// GET /api/v1/accounts/:username/followers
pub async fn get_account_followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let page = params.parse()?;
    let accounts = RelationshipService::new(state.db.clone())
        .followers(&username, &page)
        .await?;

    Ok(Json(to_responses(accounts)))
}
