//! Request identity
//!
//! Resolves the acting account for authenticated routes.

mod middleware;

pub use middleware::{AUTHENTICATION_HEADER, CurrentAccount};
