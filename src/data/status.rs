//! Status store
//!
//! Single-row status CRUD plus the two status timelines, both shaped by
//! the shared [`CursorWindow`](super::CursorWindow).

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::time::Instant;

use super::models::{AccountId, NewStatus, Status, StatusId};
use super::pagination::PageParams;
use crate::error::AppError;
use crate::metrics::observe_db_query;

/// Status rows and timelines
#[derive(Clone)]
pub struct StatusStore {
    pool: SqlitePool,
}

impl StatusStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Single row
    // =========================================================================

    /// Insert a new status
    ///
    /// `created_at` is set to the insertion time.
    pub async fn create(&self, status: &NewStatus) -> Result<Status, AppError> {
        let started = Instant::now();
        let created = sqlx::query_as::<_, Status>(
            r#"
            INSERT INTO status (account_id, content, create_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(status.account_id)
        .bind(&status.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        observe_db_query("INSERT", "status", started);

        tracing::debug!(
            status_id = created.id,
            account_id = created.account_id,
            "Status created"
        );
        Ok(created)
    }

    /// Get status by ID
    pub async fn find(&self, id: StatusId) -> Result<Option<Status>, AppError> {
        let started = Instant::now();
        let status = sqlx::query_as::<_, Status>("SELECT * FROM status WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        observe_db_query("SELECT", "status", started);

        Ok(status)
    }

    /// Get status by ID or fail with `NotFound`
    pub async fn retrieve(&self, id: StatusId) -> Result<Status, AppError> {
        self.find(id).await?.ok_or(AppError::NotFound)
    }

    /// Delete status by ID
    ///
    /// Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: StatusId) -> Result<(), AppError> {
        let started = Instant::now();
        let result = sqlx::query("DELETE FROM status WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        observe_db_query("DELETE", "status", started);

        tracing::debug!(
            status_id = id,
            removed = result.rows_affected(),
            "Status delete"
        );
        Ok(())
    }

    // =========================================================================
    // Timelines
    // =========================================================================

    /// Every status, newest first, windowed on status id
    ///
    /// `only_media` is accepted and has no effect.
    pub async fn public_timeline(&self, params: &PageParams) -> Result<Vec<Status>, AppError> {
        let window = params.window();

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM status");
        window.push_bounds(&mut query, "id", false);
        window.push_order_and_limit(&mut query, "create_at", "id");

        let started = Instant::now();
        let statuses = query
            .build_query_as::<Status>()
            .fetch_all(&self.pool)
            .await?;
        observe_db_query("SELECT", "status", started);

        tracing::debug!(?window, returned = statuses.len(), "Public timeline");
        Ok(statuses)
    }

    /// Statuses authored by accounts that `account_id` follows
    ///
    /// Same window semantics as [`public_timeline`](Self::public_timeline).
    /// The author is the `follower_id` side of an edge whose `following_id`
    /// is `account_id`.
    pub async fn home_timeline(
        &self,
        account_id: AccountId,
        params: &PageParams,
    ) -> Result<Vec<Status>, AppError> {
        let window = params.window();

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT status.* FROM status \
             INNER JOIN relationship ON status.account_id = relationship.follower_id \
             WHERE relationship.following_id = ",
        );
        query.push_bind(account_id);
        window.push_bounds(&mut query, "status.id", true);
        window.push_order_and_limit(&mut query, "status.create_at", "status.id");

        let started = Instant::now();
        let statuses = query
            .build_query_as::<Status>()
            .fetch_all(&self.pool)
            .await?;
        observe_db_query("SELECT", "status", started);

        tracing::debug!(account_id, ?window, returned = statuses.len(), "Home timeline");
        Ok(statuses)
    }
}
