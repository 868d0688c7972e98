//! # Filtering, Sorting & Pagination
//!
//! Translates search query parameters into a Sea-ORM [`Condition`](sea_orm::Condition)
//! and ordering, without ever interpolating user input into SQL.
//!
//! ## Main Components
//!
//! - **[`FieldDef`]**: one entry of an entity's declared field schema
//! - **[`FilterSpec`]**: one parsed search request
//! - **[`SearchParams::parse`](crate::models::SearchParams::parse)**: query string to `FilterSpec`
//! - **[`QueryComposer`]**: `FilterSpec` to `WHERE` condition
//! - **[`resolve_sort`]**: allow-listed sort field resolution
//!
//! ## Query Parameter Examples
//!
//! ```text
//! // General term, matched accent-insensitively in any searchable field
//! GET /students?q=garcia
//!
//! // Specific filters are ANDed with each other and with the general term
//! GET /students?q=garcia&enrolled=true
//!
//! // Inclusive ranges, either side optional
//! GET /classes?price_min=10&price_max=49.99
//! GET /exercises?start_date_min=2024-09-01
//!
//! // Enum literals are case-insensitive on input
//! GET /classes?format=online&difficulty=AVANZADO
//!
//! // Derived window status and link-table membership
//! GET /exercises?status=ACTIVE
//! GET /professors?class_id=5f0c...&has_no_classes=false
//!
//! // Paging and sorting
//! GET /professors?page=2&size=10&sort_by=last_name&sort_direction=DESC
//! ```
//!
//! ## Semantics
//!
//! - An absent filter never restricts the result set.
//! - Text filters match `fold(column) LIKE '%fold(term)%'`, where `fold` is the
//!   negotiated [`TextNormalization`](crate::normalization::TextNormalization).
//! - Enums, booleans, identifiers and ranges compare exactly, without folding.
//! - Window status compares the window columns with the request time; link
//!   filters become `id IN (SELECT ...)` / `id NOT IN (SELECT ...)` subqueries.
//! - Unknown filters, unknown sort fields and malformed values are rejected
//!   before any query is built.

pub mod conditions;
pub mod filter_spec;
pub mod pagination;
pub mod params;
pub mod schema;
pub mod search;
pub mod sort;

// Re-export commonly used items
pub use conditions::QueryComposer;
pub use filter_spec::{Filter, FilterSpec, FilterValue, Range, SortDirection};
pub use pagination::{page_window, total_pages};
pub use schema::{
    FieldDef, FieldKind, LinkTable, TextMatch, WindowStatus, find_field, searchable_names,
    sortable_names,
};
pub use search::escape_like_wildcards;
pub use sort::{DEFAULT_SORT_FIELD, ResolvedSort, resolve_sort};
