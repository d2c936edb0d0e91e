//! Timeline service
//!
//! Answers the public and home timelines from the status store.

use std::sync::Arc;

use crate::data::{Account, Database, PageParams, Status};
use crate::error::AppError;

/// Timeline service
pub struct TimelineService {
    db: Arc<Database>,
}

impl TimelineService {
    /// Create new timeline service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get public timeline
    ///
    /// Every status, newest first, windowed on status id.
    pub async fn public_timeline(&self, params: &PageParams) -> Result<Vec<Status>, AppError> {
        self.db.statuses().public_timeline(params).await
    }

    /// Get home timeline
    ///
    /// Statuses from accounts `viewer` follows. Following nobody yields an
    /// empty timeline, not an error.
    pub async fn home_timeline(
        &self,
        viewer: &Account,
        params: &PageParams,
    ) -> Result<Vec<Status>, AppError> {
        self.db.statuses().home_timeline(viewer.id, params).await
    }
}
