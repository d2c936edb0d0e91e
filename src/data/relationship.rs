//! Relationship store
//!
//! Owns the follow edge set and the two denormalized counters on `account`.
//!
//! # Consistency
//!
//! For every account A:
//! - `A.following_count` = edges with `following_id = A.id`
//! - `A.followers_count` = edges with `follower_id = A.id`
//!
//! Every mutation writes the edge and both counters inside one transaction.
//! On any failure the transaction is rolled back before the error is
//! returned, so readers never observe an edge without its counter changes.
//! Duplicate follows are detected by the `UNIQUE (following_id, follower_id)`
//! constraint; there is no application-level locking.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::time::Instant;

use super::models::{Account, AccountId, Relationship};
use super::pagination::{CursorWindow, PageParams};
use crate::error::{AppError, is_unique_violation};
use crate::metrics::{observe_db_query, observe_relationship_mutation};

/// Denormalized counter column on `account`
#[derive(Debug, Clone, Copy)]
enum Counter {
    Following,
    Followers,
}

impl Counter {
    fn update_sql(self) -> &'static str {
        match self {
            Counter::Following => {
                "UPDATE account SET following_count = following_count + ? WHERE id = ?"
            }
            Counter::Followers => {
                "UPDATE account SET followers_count = followers_count + ? WHERE id = ?"
            }
        }
    }
}

async fn adjust_counter(
    tx: &mut Transaction<'_, Sqlite>,
    counter: Counter,
    account_id: AccountId,
    delta: i64,
) -> Result<(), AppError> {
    sqlx::query(counter.update_sql())
        .bind(delta)
        .bind(account_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn rollback(tx: Transaction<'_, Sqlite>, operation: &str, cause: &AppError) {
    match tx.rollback().await {
        Ok(()) => match cause {
            AppError::DuplicateEdge | AppError::EdgeNotFound => {
                tracing::debug!(operation, error = %cause, "Relationship transaction rolled back");
            }
            _ => {
                tracing::warn!(operation, error = %cause, "Relationship transaction rolled back");
            }
        },
        Err(error) => {
            // The connection drops the transaction when it is returned to the pool.
            tracing::error!(operation, %error, cause = %cause, "Rollback failed");
        }
    }
}

/// Follow edges and their counters
#[derive(Clone)]
pub struct RelationshipStore {
    pool: SqlitePool,
}

impl RelationshipStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create the edge "`following_id` follows `follower_id`"
    ///
    /// Inserts the edge, bumps `following_count` of `following_id` and
    /// `followers_count` of `follower_id`, all in one transaction.
    /// Self-follow is not rejected here; callers check it.
    ///
    /// # Errors
    /// `DuplicateEdge` if the edge already exists
    pub async fn create(
        &self,
        following_id: AccountId,
        follower_id: AccountId,
    ) -> Result<Relationship, AppError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let result = Self::insert_edge(&mut tx, following_id, follower_id).await;
        let outcome = match result {
            Ok(edge) => match tx.commit().await {
                Ok(()) => Ok(edge),
                Err(error) => Err(AppError::Database(error)),
            },
            Err(error) => {
                rollback(tx, "create", &error).await;
                Err(error)
            }
        };
        observe_db_query("INSERT", "relationship", started);
        observe_relationship_mutation("create", outcome_label(&outcome));

        let edge = outcome?;
        tracing::info!(following_id, follower_id, "Relationship created");
        Ok(edge)
    }

    async fn insert_edge(
        tx: &mut Transaction<'_, Sqlite>,
        following_id: AccountId,
        follower_id: AccountId,
    ) -> Result<Relationship, AppError> {
        let edge = sqlx::query_as::<_, Relationship>(
            r#"
            INSERT INTO relationship (following_id, follower_id, create_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(following_id)
        .bind(follower_id)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                AppError::DuplicateEdge
            } else {
                AppError::Database(error)
            }
        })?;

        adjust_counter(tx, Counter::Following, following_id, 1).await?;
        adjust_counter(tx, Counter::Followers, follower_id, 1).await?;

        Ok(edge)
    }

    /// Delete the edge "`following_id` follows `follower_id`"
    ///
    /// Removes the edge and decrements both counters in one transaction.
    ///
    /// # Errors
    /// `EdgeNotFound` if no edge matched; no counter is touched
    pub async fn delete(
        &self,
        following_id: AccountId,
        follower_id: AccountId,
    ) -> Result<(), AppError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let result = Self::remove_edge(&mut tx, following_id, follower_id).await;
        let outcome = match result {
            Ok(()) => tx.commit().await.map_err(AppError::Database),
            Err(error) => {
                rollback(tx, "delete", &error).await;
                Err(error)
            }
        };
        observe_db_query("DELETE", "relationship", started);
        observe_relationship_mutation("delete", outcome_label(&outcome));

        outcome?;
        tracing::info!(following_id, follower_id, "Relationship deleted");
        Ok(())
    }

    async fn remove_edge(
        tx: &mut Transaction<'_, Sqlite>,
        following_id: AccountId,
        follower_id: AccountId,
    ) -> Result<(), AppError> {
        let removed =
            sqlx::query("DELETE FROM relationship WHERE following_id = ? AND follower_id = ?")
                .bind(following_id)
                .bind(follower_id)
                .execute(&mut **tx)
                .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::EdgeNotFound);
        }

        adjust_counter(tx, Counter::Following, following_id, -1).await?;
        adjust_counter(tx, Counter::Followers, follower_id, -1).await?;

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every edge touching `account_id` on either side, in insertion order
    pub async fn retrieve(&self, account_id: AccountId) -> Result<Vec<Relationship>, AppError> {
        let started = Instant::now();
        let edges = sqlx::query_as::<_, Relationship>(
            r#"
            SELECT * FROM relationship
            WHERE following_id = ? OR follower_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(account_id)
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        observe_db_query("SELECT", "relationship", started);

        Ok(edges)
    }

    /// Accounts that `account_id` follows, most recent edge first
    ///
    /// Only the limit half of the pagination contract applies here.
    pub async fn retrieve_following(
        &self,
        account_id: AccountId,
        limit: Option<u64>,
    ) -> Result<Vec<Account>, AppError> {
        let window = CursorWindow::limit_only(limit);

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT account.* FROM account \
             INNER JOIN relationship ON account.id = relationship.follower_id \
             WHERE relationship.following_id = ",
        );
        query.push_bind(account_id);
        window.push_order_and_limit(&mut query, "relationship.create_at", "relationship.id");

        let started = Instant::now();
        let accounts = query
            .build_query_as::<Account>()
            .fetch_all(&self.pool)
            .await?;
        observe_db_query("SELECT", "relationship", started);

        Ok(accounts)
    }

    /// Accounts following `account_id`, most recent edge first
    ///
    /// Cursor bounds apply to the follower account's id. `only_media` is
    /// accepted and has no effect.
    pub async fn retrieve_followers(
        &self,
        account_id: AccountId,
        params: &PageParams,
    ) -> Result<Vec<Account>, AppError> {
        let window = params.window();

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT account.* FROM account \
             INNER JOIN relationship ON account.id = relationship.following_id \
             WHERE relationship.follower_id = ",
        );
        query.push_bind(account_id);
        window.push_bounds(&mut query, "account.id", true);
        window.push_order_and_limit(&mut query, "relationship.create_at", "relationship.id");

        let started = Instant::now();
        let accounts = query
            .build_query_as::<Account>()
            .fetch_all(&self.pool)
            .await?;
        observe_db_query("SELECT", "relationship", started);

        Ok(accounts)
    }

    /// Live count of edges where `account_id` is the actor
    pub async fn count_following(&self, account_id: AccountId) -> Result<u64, AppError> {
        self.count_edges("SELECT COUNT(*) FROM relationship WHERE following_id = ?", account_id)
            .await
    }

    /// Live count of edges where `account_id` is the target
    pub async fn count_followers(&self, account_id: AccountId) -> Result<u64, AppError> {
        self.count_edges("SELECT COUNT(*) FROM relationship WHERE follower_id = ?", account_id)
            .await
    }

    async fn count_edges(&self, sql: &'static str, account_id: AccountId) -> Result<u64, AppError> {
        let started = Instant::now();
        let count = sqlx::query_scalar::<_, i64>(sql)
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;
        observe_db_query("SELECT", "relationship", started);

        Ok(count.max(0) as u64)
    }
}

fn outcome_label<T>(outcome: &Result<T, AppError>) -> &'static str {
    match outcome {
        Ok(_) => "ok",
        Err(error) => error.kind(),
    }
}
