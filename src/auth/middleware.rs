//! Identity extractors
//!
//! The acting account is named by the `Authentication: username <name>`
//! header and resolved through the account directory.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use crate::AppState;
use crate::data::Account;
use crate::error::AppError;

/// Header carrying the acting username
pub const AUTHENTICATION_HEADER: &str = "Authentication";

fn extract_username_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHENTICATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("username "))
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .map(ToOwned::to_owned)
}

async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Account, AppError> {
    let username = extract_username_from_headers(headers).ok_or(AppError::Unauthorized)?;

    state
        .db
        .accounts()
        .find_by_username(&username)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Extractor for the authenticated account
///
/// # Usage
/// ```ignore
/// async fn handler(
///     CurrentAccount(account): CurrentAccount,
/// ) -> impl IntoResponse {
///     format!("Hello, {}", account.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<Account>().cloned() {
            return Ok(CurrentAccount(account));
        }

        let state = AppState::from_ref(state);
        let account = authenticate(&parts.headers, &state).await?;
        parts.extensions.insert(account.clone());

        Ok(CurrentAccount(account))
    }
}
