//! Process-wide pagination defaults shared by the request decoder and the
//! list engine.

/// Page size used when a request does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Fallback values for list requests that omit the sort direction, offset or
/// limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    pub descending: bool,
    pub skip: usize,
    pub take: usize,
}

pub const PAGINATION_DEFAULTS: PaginationDefaults = PaginationDefaults {
    descending: false,
    skip: 0,
    take: DEFAULT_ITEMS_PER_PAGE,
};

impl Default for PaginationDefaults {
    fn default() -> Self {
        PAGINATION_DEFAULTS
    }
}
