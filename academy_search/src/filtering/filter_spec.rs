use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::sea_query::Order;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::schema::{FieldDef, FieldKind, WindowStatus, find_field};
use crate::config::{DEFAULT_PAGE_SIZE, SearchConfig};
use crate::validation::{ValidationError, validators};

/// An optional filter. `Absent` never restricts the result set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> Filter<T> {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

/// Inclusive bounds. A missing side leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd> Range<T> {
    #[must_use]
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// `false` only when both bounds are set and `min > max`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Typed value of a specific filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Uuid(Uuid),
    /// Canonical enum literal, e.g. `ONLINE`.
    Enum(String),
    Timestamp(NaiveDateTime),
    IntegerRange(Range<i64>),
    DecimalRange(Range<Decimal>),
    TimestampRange(Range<NaiveDateTime>),
    WindowStatus(WindowStatus),
}

impl FilterValue {
    /// Whether this value can be applied to a field of `kind`.
    #[must_use]
    pub const fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), FieldKind::Text(_))
                | (Self::Bool(_), FieldKind::Bool | FieldKind::Unlinked(_))
                | (Self::Integer(_), FieldKind::Integer)
                | (Self::Decimal(_), FieldKind::Decimal)
                | (Self::Uuid(_), FieldKind::Uuid | FieldKind::LinkedTo(_))
                | (Self::Enum(_), FieldKind::Enum(_))
                | (Self::Timestamp(_), FieldKind::Timestamp)
                | (Self::IntegerRange(_), FieldKind::IntegerRange)
                | (Self::DecimalRange(_), FieldKind::DecimalRange)
                | (Self::TimestampRange(_), FieldKind::TimestampRange)
                | (Self::WindowStatus(_), FieldKind::WindowStatus)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            d if d.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            d if d.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            other => Err(ValidationError::new(
                "sort_direction",
                format!("Must be ASC or DESC, got '{other}'"),
            )),
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// One search request: a general term, named field filters, paging and sort.
///
/// ```rust,ignore
/// let spec = FilterSpec::new()
///     .with_general_term("garcia")
///     .with_filter("enrolled", FilterValue::Bool(true))
///     .with_page(0)
///     .with_page_size(10)
///     .sorted_by("last_name", SortDirection::Asc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub general_term: Filter<String>,
    pub fields: BTreeMap<String, Filter<FilterValue>>,
    /// Zero-based page index.
    pub page: u64,
    pub page_size: u64,
    /// `None` sorts by the primary identifier.
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            general_term: Filter::Absent,
            fields: BTreeMap::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_general_term(mut self, term: impl Into<String>) -> Self {
        self.general_term = Filter::Present(term.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.fields.insert(name.into(), Filter::Present(value));
        self
    }

    /// Record a filter as explicitly absent.
    #[must_use]
    pub fn without_filter(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Filter::Absent);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// The general term, when present and not blank.
    #[must_use]
    pub fn general_term(&self) -> Option<&str> {
        self.general_term
            .as_present()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
    }

    /// Filters that restrict the result set, in name order.
    pub fn present_filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.fields
            .iter()
            .filter_map(|(name, filter)| filter.as_present().map(|value| (name.as_str(), value)))
    }

    /// Check the request against an entity's field schema before any query is built.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter: page size outside
    /// `1..=max_page_size`, a page whose offset overflows, an over-long term,
    /// an unknown or non-sortable `sort_by`, an unknown filter, a value of the
    /// wrong type, an enum literal outside its set, or a range with `min > max`.
    pub fn validate<C>(&self, fields: &[FieldDef<C>], config: &SearchConfig) -> Result<(), ValidationError> {
        validators::validate_range("size", self.page_size, Some(1), Some(config.max_page_size))?;
        if self.page.checked_mul(self.page_size).is_none() {
            return Err(ValidationError::new("page", "Page index is too large"));
        }

        if let Some(term) = self.general_term.as_present() {
            validators::validate_max_length("q", term, config.max_term_length)?;
        }

        if let Some(sort_by) = &self.sort_by
            && !find_field(fields, sort_by).is_some_and(|field| field.sortable)
        {
            return Err(ValidationError::new(
                "sort_by",
                format!("Unknown sort field '{sort_by}'"),
            ));
        }

        for (name, filter) in &self.fields {
            let Some(field) = find_field(fields, name) else {
                return Err(ValidationError::new(name.as_str(), "Unknown filter"));
            };
            let Filter::Present(value) = filter else {
                continue;
            };
            validate_value(name, field.kind, value, config)?;
        }

        Ok(())
    }
}

fn validate_value(
    name: &str,
    kind: FieldKind,
    value: &FilterValue,
    config: &SearchConfig,
) -> Result<(), ValidationError> {
    if !value.fits(kind) {
        return Err(ValidationError::new(
            name,
            format!("Expected {}", kind.expected()),
        ));
    }

    let ordered = match value {
        FilterValue::Text(text) => {
            return validators::validate_max_length(name, text, config.max_term_length);
        }
        FilterValue::Enum(literal) => {
            if let FieldKind::Enum(allowed) = kind
                && !allowed.contains(&literal.as_str())
            {
                return Err(ValidationError::new(
                    name,
                    format!("Must be one of {}", allowed.join(", ")),
                ));
            }
            true
        }
        FilterValue::IntegerRange(range) => range.is_ordered(),
        FilterValue::DecimalRange(range) => range.is_ordered(),
        FilterValue::TimestampRange(range) => range.is_ordered(),
        _ => true,
    };

    if ordered {
        Ok(())
    } else {
        Err(ValidationError::new(
            name,
            "Lower bound must not exceed upper bound",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::schema::tests::person_fields;

    fn check(spec: &FilterSpec) -> Result<(), ValidationError> {
        spec.validate(&person_fields(), &SearchConfig::default())
    }

    #[test]
    fn test_defaults() {
        let spec = FilterSpec::new();
        assert_eq!(spec.page, 0);
        assert_eq!(spec.page_size, 20);
        assert_eq!(spec.sort_direction, SortDirection::Asc);
        assert!(spec.sort_by.is_none());
        assert!(check(&spec).is_ok());
    }

    #[test]
    fn test_page_size_bounds_are_rejected_not_clamped() {
        let err = check(&FilterSpec::new().with_page_size(0)).unwrap_err();
        assert_eq!(err.field, "size");

        let err = check(&FilterSpec::new().with_page_size(101)).unwrap_err();
        assert_eq!(err.field, "size");
        assert_eq!(err.message, "Must be at most 100");

        assert!(check(&FilterSpec::new().with_page_size(100)).is_ok());
    }

    #[test]
    fn test_overflowing_page_is_rejected() {
        let err = check(&FilterSpec::new().with_page(u64::MAX).with_page_size(2)).unwrap_err();
        assert_eq!(err.field, "page");
    }

    #[test]
    fn test_unknown_sort_field() {
        let spec = FilterSpec::new().sorted_by("nonexistentField", SortDirection::Asc);
        let err = check(&spec).unwrap_err();
        assert_eq!(err.field, "sort_by");
        assert!(err.message.contains("nonexistentField"));
    }

    #[test]
    fn test_non_sortable_field_is_rejected() {
        let spec = FilterSpec::new().sorted_by("balance", SortDirection::Desc);
        assert_eq!(check(&spec).unwrap_err().field, "sort_by");
    }

    #[test]
    fn test_unknown_filter_even_when_absent() {
        let spec = FilterSpec::new().without_filter("salary");
        let err = check(&spec).unwrap_err();
        assert_eq!(err.field, "salary");
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let spec = FilterSpec::new().with_filter("active", FilterValue::Text("yes".into()));
        let err = check(&spec).unwrap_err();
        assert_eq!(err.field, "active");
        assert!(err.message.contains("boolean"));
    }

    #[test]
    fn test_enum_literal_must_be_canonical() {
        let ok = FilterSpec::new().with_filter("level", FilterValue::Enum("HIGH".into()));
        assert!(check(&ok).is_ok());

        let bad = FilterSpec::new().with_filter("level", FilterValue::Enum("EXTREME".into()));
        let err = check(&bad).unwrap_err();
        assert_eq!(err.field, "level");
        assert_eq!(err.message, "Must be one of LOW, HIGH");
    }

    #[test]
    fn test_inverted_range() {
        let spec = FilterSpec::new().with_filter(
            "balance",
            FilterValue::DecimalRange(Range::new(Some(Decimal::new(50, 0)), Some(Decimal::new(10, 0)))),
        );
        assert_eq!(check(&spec).unwrap_err().field, "balance");

        let half_open = FilterSpec::new().with_filter(
            "balance",
            FilterValue::DecimalRange(Range::new(Some(Decimal::new(50, 0)), None)),
        );
        assert!(check(&half_open).is_ok());

        let point = FilterSpec::new()
            .with_filter("age", FilterValue::IntegerRange(Range::new(Some(30), Some(30))));
        assert!(check(&point).is_ok());
    }

    #[test]
    fn test_general_term_helpers() {
        assert_eq!(FilterSpec::new().general_term(), None);
        assert_eq!(FilterSpec::new().with_general_term("   ").general_term(), None);
        assert_eq!(
            FilterSpec::new().with_general_term(" garcia ").general_term(),
            Some("garcia")
        );
    }

    #[test]
    fn test_present_filters_skip_absent() {
        let spec = FilterSpec::new()
            .with_filter("active", FilterValue::Bool(true))
            .without_filter("name");
        let present: Vec<_> = spec.present_filters().map(|(name, _)| name).collect();
        assert_eq!(present, vec!["active"]);
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(" DESC ".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        let err = "sideways".parse::<SortDirection>().unwrap_err();
        assert_eq!(err.field, "sort_direction");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"DESC\"");
    }

    #[test]
    fn test_derived_kinds_accept_their_values() {
        let spec = FilterSpec::new()
            .with_filter("membership", FilterValue::WindowStatus(WindowStatus::Expired))
            .with_filter("team_id", FilterValue::Uuid(Uuid::nil()))
            .with_filter("has_no_team", FilterValue::Bool(true));
        assert!(check(&spec).is_ok());

        let spec = FilterSpec::new().with_filter("team_id", FilterValue::Bool(true));
        let err = check(&spec).unwrap_err();
        assert_eq!(err.field, "team_id");
        assert_eq!(err.message, "Expected a UUID");

        let spec = FilterSpec::new().with_filter("membership", FilterValue::Enum("ACTIVE".into()));
        assert_eq!(check(&spec).unwrap_err().field, "membership");
    }

    #[test]
    fn test_filter_from_option() {
        assert_eq!(Filter::from(Some(1)), Filter::Present(1));
        assert_eq!(Filter::<i32>::from(None), Filter::Absent);
        assert!(!Filter::<i32>::default().is_present());
    }
}
