/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound on the page size, whatever the client asks for.
pub const MAX_LIMIT: u64 = 100;

/// Largest offset storage accepts; larger skips are clamped to it and yield
/// an empty page.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Skip/limit window over a list of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

impl Pagination {
    /// Build a window from optional client values, capping `limit` at
    /// [`MAX_LIMIT`] and `skip` at [`MAX_SKIP`].
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).min(MAX_SKIP),
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
