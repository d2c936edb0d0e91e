//! Timeline endpoints

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::params::PaginationParams;
use crate::AppState;
use crate::api::dto::{StatusResponse, to_responses};
use crate::auth::CurrentAccount;
use crate::error::AppError;
use crate::service::TimelineService;

/// GET /api/v1/timelines/home
pub async fn home_timeline(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<StatusResponse>>, AppError> {
    let page = params.parse()?;
    let statuses = TimelineService::new(state.db.clone())
        .home_timeline(&account, &page)
        .await?;

    Ok(Json(to_responses(statuses)))
}

/// GET /api/v1/timelines/public
pub async fn public_timeline(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<StatusResponse>>, AppError> {
    let page = params.parse()?;
    let statuses = TimelineService::new(state.db.clone())
        .public_timeline(&page)
        .await?;

    Ok(Json(to_responses(statuses)))
}
