use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::filtering::filter_spec::SortDirection;

/// Reserved query parameters of every search endpoint.
///
/// # Filtering
/// - **General term:** `q` is matched against every searchable text field of
///   the entity, accent- and case-insensitively, and a record matches if any
///   field contains it. For example `?q=garcia` finds "Ángel García".
/// - **Specific filters:** any other key must name a declared field of the
///   entity, for example `?enrolled=true` or `?format=online`. Filters are
///   combined with AND; a blank value is ignored.
/// - **Ranges:** numeric and date fields take inclusive bounds through
///   `<field>_min` and `<field>_max`, for example `?price_min=10&price_max=50`.
///   Either bound may be omitted.
///
/// Unknown keys are rejected with 400 Bad Request.
///
/// # Pagination
/// `page` is zero-based; `size` must be between 1 and the configured maximum (100 by default).
///
/// # Sorting
/// `sort_by` must name a sortable field; results are sorted by `id` when it is omitted.
/// `sort_direction` is `ASC` (default) or `DESC`.
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// General search term matched across all searchable fields.
    ///
    /// Example: `garcia`
    #[param(example = "garcia")]
    pub q: Option<String>,
    /// Zero-based page index.
    ///
    /// Example: `0`
    #[param(example = 0)]
    pub page: Option<u64>,
    /// Number of items per page.
    ///
    /// Example: `20`
    #[param(example = 20)]
    pub size: Option<u64>,
    /// Field to sort by.
    ///
    /// Example: `last_name`
    #[param(example = "last_name")]
    pub sort_by: Option<String>,
    /// Sort direction, `ASC` or `DESC`.
    #[param(example = "ASC")]
    pub sort_direction: Option<SortDirection>,
}
