//! Mastodon-style API endpoints
//!
//! Accounts, follow relationships, statuses and timelines.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::{get, post},
};

use crate::AppState;
use crate::metrics::{HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL};

pub mod accounts;
pub mod params;
pub mod statuses;
pub mod timelines;

/// Create the API router
///
/// Authentication is enforced by the `CurrentAccount` extractor in the
/// handlers that need an actor.
pub fn mastodon_api_router() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/v1/accounts", post(accounts::create_account))
        .route(
            "/v1/accounts/relationships",
            get(accounts::get_relationships),
        )
        .route("/v1/accounts/:username", get(accounts::get_account))
        .route(
            "/v1/accounts/:username/follow",
            post(accounts::follow_account),
        )
        .route(
            "/v1/accounts/:username/unfollow",
            post(accounts::unfollow_account),
        )
        .route(
            "/v1/accounts/:username/following",
            get(accounts::get_account_following),
        )
        .route(
            "/v1/accounts/:username/followers",
            get(accounts::get_account_followers),
        )
        // Statuses
        .route("/v1/statuses", post(statuses::create_status))
        .route(
            "/v1/statuses/:id",
            get(statuses::get_status).delete(statuses::delete_status),
        )
        // Timelines
        .route("/v1/timelines/public", get(timelines::public_timeline))
        .route("/v1/timelines/home", get(timelines::home_timeline))
        .layer(axum::middleware::from_fn(track_http_metrics))
}

/// Count and time every request by its route template
async fn track_http_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &endpoint])
        .start_timer();
    let response = next.run(request).await;
    timer.observe_duration();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &endpoint, response.status().as_str()])
        .inc();

    response
}
