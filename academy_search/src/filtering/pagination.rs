use crate::validation::ValidationError;

/// `(offset, limit)` for a zero-based page.
///
/// # Errors
///
/// Returns a `page` [`ValidationError`] when the offset does not fit in a `u64`.
pub fn page_window(page: u64, page_size: u64) -> Result<(u64, u64), ValidationError> {
    page.checked_mul(page_size)
        .map(|offset| (offset, page_size))
        .ok_or_else(|| ValidationError::new("page", "Page index is too large"))
}

/// `ceil(total / page_size)`, and 0 when there is nothing to page.
#[must_use]
pub const fn total_pages(total_elements: u64, page_size: u64) -> u64 {
    if total_elements == 0 || page_size == 0 {
        0
    } else {
        total_elements.div_ceil(page_size)
    }
}
