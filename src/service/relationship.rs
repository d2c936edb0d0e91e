//! Relationship service
//!
//! Resolves usernames through the account directory and drives the
//! relationship store. Self-follow is rejected here, before the store is
//! reached.

use std::sync::Arc;

use crate::data::{Account, Database, PageParams, Relationship};
use crate::error::AppError;

/// Relationship service
pub struct RelationshipService {
    db: Arc<Database>,
}

impl RelationshipService {
    /// Create new relationship service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `actor` follows the account named `target_username`
    ///
    /// # Errors
    /// - `NotFound` if the target does not exist
    /// - `Validation` if the actor targets itself
    /// - `DuplicateEdge` if the actor already follows the target
    pub async fn follow(
        &self,
        actor: &Account,
        target_username: &str,
    ) -> Result<Relationship, AppError> {
        let target = self.db.accounts().retrieve(target_username).await?;
        if actor.id == target.id {
            return Err(AppError::Validation("cannot follow yourself".to_string()));
        }

        self.db.relationships().create(actor.id, target.id).await
    }

    /// `actor` stops following the account named `target_username`
    ///
    /// # Errors
    /// - `NotFound` if the target does not exist
    /// - `EdgeNotFound` if the actor does not follow the target
    pub async fn unfollow(&self, actor: &Account, target_username: &str) -> Result<(), AppError> {
        let target = self.db.accounts().retrieve(target_username).await?;
        self.db.relationships().delete(actor.id, target.id).await
    }

    /// Every edge touching `actor`
    pub async fn relationships(&self, actor: &Account) -> Result<Vec<Relationship>, AppError> {
        self.db.relationships().retrieve(actor.id).await
    }

    /// Accounts followed by `username`
    pub async fn following(
        &self,
        username: &str,
        limit: Option<u64>,
    ) -> Result<Vec<Account>, AppError> {
        let account = self.db.accounts().retrieve(username).await?;
        self.db
            .relationships()
            .retrieve_following(account.id, limit)
            .await
    }

    /// Accounts following `username`
    pub async fn followers(
        &self,
        username: &str,
        params: &PageParams,
    ) -> Result<Vec<Account>, AppError> {
        let account = self.db.accounts().retrieve(username).await?;
        self.db
            .relationships()
            .retrieve_followers(account.id, params)
            .await
    }
}
