use sea_orm::{ColumnTrait, sea_query::Order};

use super::filter_spec::FilterSpec;
use super::schema::{FieldDef, find_field};
use crate::validation::ValidationError;

/// Field used when a request does not name one.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// A sort field that has been checked against the allow-list.
#[derive(Debug, Clone)]
pub struct ResolvedSort<C> {
    /// Public field name, echoed back in the result envelope.
    pub name: &'static str,
    pub column: C,
    pub order: Order,
}

/// Resolve `sort_by`/`sort_direction` to a column.
///
/// Only fields declared `sortable` are accepted; raw input never becomes a
/// column name. An absent `sort_by` sorts by `default_column` under the name
/// [`DEFAULT_SORT_FIELD`].
///
/// # Errors
///
/// Returns a `sort_by` [`ValidationError`] for unknown or non-sortable fields.
pub fn resolve_sort<C>(
    spec: &FilterSpec,
    fields: &[FieldDef<C>],
    default_column: C,
) -> Result<ResolvedSort<C>, ValidationError>
where
    C: ColumnTrait + Copy,
{
    let order = spec.sort_direction.into();

    let Some(requested) = spec.sort_by.as_deref() else {
        return Ok(ResolvedSort {
            name: DEFAULT_SORT_FIELD,
            column: default_column,
            order,
        });
    };

    find_field(fields, requested)
        .filter(|field| field.sortable)
        .map(|field| ResolvedSort {
            name: field.name,
            column: field.column,
            order,
        })
        .ok_or_else(|| ValidationError::new("sort_by", format!("Unknown sort field '{requested}'")))
}
