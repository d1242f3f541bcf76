//! Pagination over ordered collections
//!
//! All listing endpoints share the same 1-based page/limit scheme. Ordering is
//! the caller's responsibility; the window itself is order-agnostic and maps
//! directly onto SQL `LIMIT`/`OFFSET`.

/// Offset/limit window for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of rows to skip
    pub offset: i64,
    /// Maximum rows on the page
    pub limit: i64,
}

/// Compute the window for a 1-based page over a collection of `total` items.
///
/// Returns `None` when the page holds no items: page below 1, non-positive
/// limit, or a page starting beyond the end of the collection. Callers
/// translate `None` into an empty slice (with the true total), never an error.
pub fn page_window(total: i64, page: i64, limit: i64) -> Option<PageWindow> {
    if page < 1 || limit <= 0 {
        return None;
    }

    // Huge page numbers overflow the offset arithmetic; such a page is
    // necessarily past the end, so it gets the same empty-slice treatment
    let offset = page.checked_sub(1).and_then(|p| p.checked_mul(limit))?;
    if offset >= total {
        return None;
    }

    Some(PageWindow { offset, limit })
}
