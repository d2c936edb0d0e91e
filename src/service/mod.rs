//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services resolve identities and compose the data-layer stores.

mod relationship;
mod timeline;

pub use relationship::RelationshipService;
pub use timeline::TimelineService;
