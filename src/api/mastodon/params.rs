//! Query and path parameter parsing
//!
//! Parameters arrive as raw strings so that an empty value (`?max_id=`)
//! can be treated as absent and a malformed one reported as a validation
//! error with the usual JSON body.

use serde::Deserialize;

use crate::data::{PageParams, StatusId};
use crate::error::AppError;

/// Cursor pagination parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub only_media: Option<String>,
    pub max_id: Option<String>,
    pub since_id: Option<String>,
    pub limit: Option<String>,
}

impl PaginationParams {
    /// Parse into store-level page parameters
    pub fn parse(&self) -> Result<PageParams, AppError> {
        Ok(PageParams {
            only_media: parse_optional_u64("only_media", self.only_media.as_deref())?,
            max_id: parse_optional_u64("max_id", self.max_id.as_deref())?,
            since_id: parse_optional_u64("since_id", self.since_id.as_deref())?,
            limit: parse_optional_u64("limit", self.limit.as_deref())?,
        })
    }
}

/// Limit-only parameters (following listing)
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

impl LimitParams {
    pub fn parse(&self) -> Result<Option<u64>, AppError> {
        parse_optional_u64("limit", self.limit.as_deref())
    }
}

/// Parse an optional unsigned integer query value
///
/// Missing and empty values are both `None`.
pub fn parse_optional_u64(name: &str, raw: Option<&str>) -> Result<Option<u64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{name} must be an unsigned integer"))),
    }
}

/// Parse a status id path segment
pub fn parse_status_id(raw: &str) -> Result<StatusId, AppError> {
    raw.parse::<StatusId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("id must be a positive integer".to_string()))
}
