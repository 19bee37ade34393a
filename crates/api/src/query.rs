//! Shared query parameter handling for list handlers.

use horology_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// A resolved `?limit=&offset=` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Apply the default page size and clamp both values.
    pub fn resolve(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            offset: clamp_offset(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamps() {
        assert_eq!(
            PageWindow::resolve(None, None),
            PageWindow {
                limit: 20,
                offset: 0
            }
        );
        assert_eq!(PageWindow::resolve(Some(1_000), Some(-1)).limit, 100);
        assert_eq!(PageWindow::resolve(Some(1_000), Some(-1)).offset, 0);
    }
}
