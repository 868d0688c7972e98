use serde::Serialize;
use utoipa::ToSchema;

use crate::filtering::{FilterSpec, SortDirection, total_pages};

/// Uniform response envelope of every search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Matching records of the requested page, at most `size` of them.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub page: u64,
    pub size: u64,
    /// Count of all matching records, ignoring paging.
    pub total_elements: u64,
    pub total_pages: u64,
    pub sort_by: String,
    pub sort_direction: SortDirection,
    pub first: bool,
    pub last: bool,
    pub has_content: bool,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn new(
        content: Vec<T>,
        page: u64,
        size: u64,
        total_elements: u64,
        sort_by: impl Into<String>,
        sort_direction: SortDirection,
    ) -> Self {
        let total_pages = total_pages(total_elements, size);
        Self {
            has_content: !content.is_empty(),
            first: page == 0,
            last: page.saturating_add(1) >= total_pages,
            content,
            page,
            size,
            total_elements,
            total_pages,
            sort_by: sort_by.into(),
            sort_direction,
        }
    }

    /// Envelope for `spec` with the resolved sort field name.
    #[must_use]
    pub fn for_spec(content: Vec<T>, spec: &FilterSpec, total_elements: u64, sort_by: &str) -> Self {
        Self::new(
            content,
            spec.page,
            spec.page_size,
            total_elements,
            sort_by,
            spec.sort_direction,
        )
    }

    /// Convert the records while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            first: self.first,
            last: self.last,
            has_content: self.has_content,
        }
    }
}
