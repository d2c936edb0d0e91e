//! API response DTOs
//!
//! Data Transfer Objects for JSON responses, with conversions from the
//! data-layer models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{Account, Relationship, Status};

/// Account response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub following_count: i64,
    pub followers_count: i64,
    pub create_at: DateTime<Utc>,
}

/// Status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub id: i64,
    pub account_id: i64,
    pub content: String,
    pub create_at: DateTime<Utc>,
}

/// Follow edge response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipResponse {
    pub following_id: i64,
    pub follower_id: i64,
    pub create_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            note: account.note,
            following_count: account.following_count,
            followers_count: account.followers_count,
            create_at: account.created_at,
        }
    }
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            account_id: status.account_id,
            content: status.content,
            create_at: status.created_at,
        }
    }
}

impl From<Relationship> for RelationshipResponse {
    fn from(edge: Relationship) -> Self {
        Self {
            following_id: edge.following_id,
            follower_id: edge.follower_id,
            create_at: edge.created_at,
        }
    }
}

/// Convert a list of models into responses
pub fn to_responses<T, R>(items: Vec<T>) -> Vec<R>
where
    R: From<T>,
{
    items.into_iter().map(R::from).collect()
}
