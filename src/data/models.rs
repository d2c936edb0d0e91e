//! Data models
//!
//! Rust structs representing database rows.
//! IDs are SQLite integer primary keys; timestamps use chrono.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Account primary key
pub type AccountId = i64;

/// Status primary key
pub type StatusId = i64;

// =============================================================================
// Account
// =============================================================================

/// A registered account
///
/// `following_count` and `followers_count` are denormalized copies of the
/// edge counts in `relationship`. Only [`RelationshipStore`](super::RelationshipStore)
/// writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    /// Number of accounts this account follows
    pub following_count: i64,
    /// Number of accounts following this account
    pub followers_count: i64,
    #[sqlx(rename = "create_at")]
    pub created_at: DateTime<Utc>,
}

/// Input for account creation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
}

// =============================================================================
// Status
// =============================================================================

/// A post
///
/// Immutable once stored: created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Status {
    pub id: StatusId,
    pub account_id: AccountId,
    pub content: String,
    #[sqlx(rename = "create_at")]
    pub created_at: DateTime<Utc>,
}

/// Input for status creation
#[derive(Debug, Clone)]
pub struct NewStatus {
    pub account_id: AccountId,
    pub content: String,
}

// =============================================================================
// Relationship
// =============================================================================

/// Directed follow edge: `following_id` follows `follower_id`
///
/// The column naming is relationship-table-centric: `following_id` is the
/// actor, `follower_id` is the account being followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Relationship {
    pub id: i64,
    pub following_id: AccountId,
    pub follower_id: AccountId,
    #[sqlx(rename = "create_at")]
    pub created_at: DateTime<Utc>,
}
