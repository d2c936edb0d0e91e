//! Account directory
//!
//! Resolves usernames to account rows. Counters are read here but only
//! ever written by the relationship store.

use chrono::Utc;
use sqlx::SqlitePool;
use std::time::Instant;

use super::models::{Account, AccountId, NewAccount};
use crate::error::{AppError, is_unique_violation};
use crate::metrics::observe_db_query;

/// Account lookups and creation
#[derive(Clone)]
pub struct AccountDirectory {
    pool: SqlitePool,
}

impl AccountDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account
    ///
    /// # Errors
    /// `Validation` for an empty username, `Conflict` when it is taken
    pub async fn create(&self, account: &NewAccount) -> Result<Account, AppError> {
        let username = account.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }

        let started = Instant::now();
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (username, display_name, note, create_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(&account.display_name)
        .bind(&account.note)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                AppError::Conflict(format!("username '{username}' is already taken"))
            } else {
                AppError::Database(error)
            }
        });
        observe_db_query("INSERT", "account", started);

        let created = created?;
        tracing::info!(account_id = created.id, username = %created.username, "Account created");
        Ok(created)
    }

    /// Find an account by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let started = Instant::now();
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        observe_db_query("SELECT", "account", started);

        Ok(account)
    }

    /// Find an account by id
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        let started = Instant::now();
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        observe_db_query("SELECT", "account", started);

        Ok(account)
    }

    /// Resolve a username or fail with `NotFound`
    pub async fn retrieve(&self, username: &str) -> Result<Account, AppError> {
        self.find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)
    }
}
