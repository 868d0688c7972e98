//! # academy_search
//!
//! Accent-insensitive search, filtering and pagination for Sea-ORM entities,
//! served through axum with OpenAPI docs from utoipa.
//!
//! A resource declares its fields once. Every request then goes through the
//! same pipeline:
//!
//! 1. raw query parameters are parsed into a [`FilterSpec`] ([`models::SearchParams::parse`])
//! 2. the filter spec is validated against the field schema
//! 3. [`QueryComposer`] turns it into a single `WHERE` condition
//! 4. the sort field is resolved against the allow-list, the page is counted and fetched
//! 5. the rows are wrapped in a [`PagedResult`]
//!
//! ```rust,ignore
//! impl SearchResource for student::Model {
//!     type EntityType = student::Entity;
//!     type ColumnType = student::Column;
//!
//!     const ID_COLUMN: Self::ColumnType = student::Column::Id;
//!     const RESOURCE_NAME_SINGULAR: &'static str = "student";
//!     const RESOURCE_NAME_PLURAL: &'static str = "students";
//!
//!     fn fields() -> Vec<FieldDef<Self::ColumnType>> {
//!         vec![
//!             FieldDef::new("id", student::Column::Id, FieldKind::Uuid).sortable(),
//!             FieldDef::normalized("first_name", student::Column::FirstName).searchable().sortable(),
//!         ]
//!     }
//! }
//!
//! let normalization = NormalizationProvider::initialize(&db).await;
//! let state = SearchState::new(db, normalization, SearchConfig::from_env());
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod normalization;
pub mod pagination;
pub mod validation;

pub use config::SearchConfig;
pub use crate::core::{SearchResource, SearchState};
pub use errors::{ApiError, SearchError};
pub use filtering::{
    FieldDef, FieldKind, Filter, FilterSpec, FilterValue, QueryComposer, Range, SortDirection,
    TextMatch,
};
pub use normalization::{NormalizationMode, NormalizationProvider, TextNormalization};
pub use pagination::PagedResult;
pub use validation::ValidationError;
