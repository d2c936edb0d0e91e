//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite connection pool and migrations
//! - Account directory
//! - Status store and timelines
//! - Relationship store (follow graph + counters)
//! - Cursor pagination shared by the listings

mod account;
mod database;
mod models;
mod pagination;
mod relationship;
mod status;

pub use account::AccountDirectory;
pub use database::Database;
pub use models::*;
pub use pagination::{CursorWindow, DEFAULT_LIMIT, MAX_LIMIT, PageParams, resolve_limit};
pub use relationship::RelationshipStore;
pub use status::StatusStore;
