//! Cursor pagination
//!
//! One window type shared by the public timeline, the home timeline and the
//! follower listing. A window is two optional inclusive bounds on a filter
//! column plus a resolved row cap; results are always returned newest first.
//!
//! The following listing only uses the cap (see [`CursorWindow::limit_only`]).

use sqlx::{QueryBuilder, Sqlite};

/// Limit applied when the caller gives none
pub const DEFAULT_LIMIT: u32 = 40;

/// Largest limit a caller may ask for
pub const MAX_LIMIT: u32 = 80;

/// Raw pagination input as received from the transport layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Accepted and ignored
    pub only_media: Option<u64>,
    /// Inclusive upper bound
    pub max_id: Option<u64>,
    /// Inclusive lower bound
    pub since_id: Option<u64>,
    pub limit: Option<u64>,
}

impl PageParams {
    /// Resolve into a window
    pub fn window(&self) -> CursorWindow {
        CursorWindow::resolve(self.since_id, self.max_id, self.limit)
    }
}

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorWindow {
    /// `column >= since_id`
    pub since_id: Option<i64>,
    /// `column <= max_id`
    pub max_id: Option<i64>,
    pub limit: u32,
}

/// Resolve a requested limit
///
/// Absent or zero falls back to [`DEFAULT_LIMIT`]; anything above
/// [`MAX_LIMIT`] is clamped.
pub fn resolve_limit(limit: Option<u64>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(requested) if requested > u64::from(MAX_LIMIT) => MAX_LIMIT,
        Some(requested) => requested as u32,
    }
}

fn to_column_value(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

impl CursorWindow {
    /// Build a window from cursor bounds and a requested limit
    pub fn resolve(since_id: Option<u64>, max_id: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            since_id: since_id.map(to_column_value),
            max_id: max_id.map(to_column_value),
            limit: resolve_limit(limit),
        }
    }

    /// Window with no range bounds, only a cap
    pub fn limit_only(limit: Option<u64>) -> Self {
        Self::resolve(None, None, limit)
    }

    /// Append the bound predicates on `column`
    ///
    /// `has_where` tells whether the query already carries a `WHERE` clause,
    /// in which case the bounds are joined with `AND`.
    pub fn push_bounds<'args>(
        &self,
        query: &mut QueryBuilder<'args, Sqlite>,
        column: &str,
        has_where: bool,
    ) {
        let mut has_where = has_where;
        let bounds = [(self.since_id, ">="), (self.max_id, "<=")];

        for (bound, operator) in bounds {
            let Some(value) = bound else {
                continue;
            };

            query.push(if has_where { " AND " } else { " WHERE " });
            query.push(format_args!("{column} {operator} "));
            query.push_bind(value);
            has_where = true;
        }
    }

    /// Append newest-first ordering and the row cap
    ///
    /// `tiebreak_column` orders rows sharing a timestamp.
    pub fn push_order_and_limit<'args>(
        &self,
        query: &mut QueryBuilder<'args, Sqlite>,
        created_at_column: &str,
        tiebreak_column: &str,
    ) {
        query.push(format_args!(
            " ORDER BY {created_at_column} DESC, {tiebreak_column} DESC LIMIT "
        ));
        query.push_bind(i64::from(self.limit));
    }
}
