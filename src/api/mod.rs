//! API layer
//!
//! HTTP handlers for:
//! - Accounts, relationships, statuses and timelines
//! - Metrics (Prometheus)

mod dto;
mod mastodon;
pub mod metrics;

pub use dto::*;

pub use mastodon::mastodon_api_router;
pub use metrics::metrics_router;
