//! Raw query-string parsing into a [`FilterSpec`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use uuid::Uuid;

use super::filter_spec::{Filter, FilterSpec, FilterValue, Range, SortDirection};
use super::schema::{FieldDef, FieldKind, WindowStatus, find_field};
use crate::config::SearchConfig;
use crate::models::SearchParams;
use crate::validation::ValidationError;

pub const GENERAL_TERM_PARAM: &str = "q";
pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SORT_BY_PARAM: &str = "sort_by";
pub const SORT_DIRECTION_PARAM: &str = "sort_direction";

const RANGE_MIN_SUFFIX: &str = "_min";
const RANGE_MAX_SUFFIX: &str = "_max";

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

impl SearchParams {
    /// Parse a raw query map against an entity's declared fields.
    ///
    /// Reserved keys are `q`, `page`, `size`, `sort_by` and `sort_direction`.
    /// Every other key must be a declared field, or `<field>_min` /
    /// `<field>_max` for range fields. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending key: an unknown
    /// filter, a value that does not parse as the field's type, or anything
    /// [`FilterSpec::validate`] rejects.
    pub fn parse<C>(
        raw: &HashMap<String, String>,
        fields: &[FieldDef<C>],
        config: &SearchConfig,
    ) -> Result<FilterSpec, ValidationError> {
        let mut spec = FilterSpec::new().with_page_size(config.default_page_size);
        let mut ranges: BTreeMap<&'static str, (FieldKind, Option<&str>, Option<&str>)> =
            BTreeMap::new();

        // Sorted so the reported error does not depend on hash order
        let sorted: BTreeMap<&str, &str> = raw
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();

        for (key, value) in sorted {
            let value = Some(value.trim()).filter(|v| !v.is_empty());

            match key {
                GENERAL_TERM_PARAM => spec.general_term = Filter::from(value.map(str::to_string)),
                PAGE_PARAM => {
                    if let Some(value) = value {
                        spec.page = parse_count(PAGE_PARAM, value, "Must be a non-negative integer")?;
                    }
                }
                SIZE_PARAM => {
                    if let Some(value) = value {
                        spec.page_size = parse_count(SIZE_PARAM, value, "Must be a positive integer")?;
                    }
                }
                SORT_BY_PARAM => spec.sort_by = value.map(str::to_string),
                SORT_DIRECTION_PARAM => {
                    if let Some(value) = value {
                        spec.sort_direction = value.parse::<SortDirection>()?;
                    }
                }
                _ => {
                    if let Some(field) = find_field(fields, key).filter(|f| !f.kind.is_range()) {
                        let filter = match value {
                            Some(value) => Filter::Present(parse_value(key, field.kind, value)?),
                            None => Filter::Absent,
                        };
                        spec.fields.insert(key.to_string(), filter);
                    } else if let Some((field, bound)) = range_field(fields, key) {
                        let entry = ranges.entry(field.name).or_insert((field.kind, None, None));
                        match bound {
                            Bound::Min => entry.1 = value,
                            Bound::Max => entry.2 = value,
                        }
                    } else {
                        return Err(ValidationError::new(key, "Unknown filter"));
                    }
                }
            }
        }

        for (name, (kind, min, max)) in ranges {
            let filter = if min.is_none() && max.is_none() {
                Filter::Absent
            } else {
                Filter::Present(parse_range(name, kind, min, max)?)
            };
            spec.fields.insert(name.to_string(), filter);
        }

        spec.validate(fields, config)?;
        Ok(spec)
    }
}

fn parse_count(field: &str, value: &str, message: &str) -> Result<u64, ValidationError> {
    value
        .parse::<u64>()
        .map_err(|_| ValidationError::new(field, message))
}

/// Resolve `price_min` to the `price` range field and its bound.
fn range_field<'a, C>(fields: &'a [FieldDef<C>], key: &str) -> Option<(&'a FieldDef<C>, Bound)> {
    let (base, bound) = if let Some(base) = key.strip_suffix(RANGE_MIN_SUFFIX) {
        (base, Bound::Min)
    } else {
        (key.strip_suffix(RANGE_MAX_SUFFIX)?, Bound::Max)
    };
    find_field(fields, base)
        .filter(|field| field.kind.is_range())
        .map(|field| (field, bound))
}

fn mismatch(name: &str, kind: FieldKind) -> ValidationError {
    ValidationError::new(name, format!("Expected {}", kind.expected()))
}

fn parse_typed<T: FromStr>(name: &str, kind: FieldKind, value: &str) -> Result<T, ValidationError> {
    value.parse::<T>().map_err(|_| mismatch(name, kind))
}

fn parse_value(name: &str, kind: FieldKind, value: &str) -> Result<FilterValue, ValidationError> {
    match kind {
        FieldKind::Text(_) => Ok(FilterValue::Text(value.to_string())),
        FieldKind::Bool | FieldKind::Unlinked(_) => parse_bool(value)
            .map(FilterValue::Bool)
            .ok_or_else(|| mismatch(name, kind)),
        FieldKind::Uuid | FieldKind::LinkedTo(_) => {
            parse_typed::<Uuid>(name, kind, value).map(FilterValue::Uuid)
        }
        FieldKind::WindowStatus => WindowStatus::from_literal(value)
            .map(FilterValue::WindowStatus)
            .ok_or_else(|| {
                ValidationError::new(
                    name,
                    format!("Must be one of {}", WindowStatus::LITERALS.join(", ")),
                )
            }),
        FieldKind::Enum(allowed) => allowed
            .iter()
            .find(|literal| literal.eq_ignore_ascii_case(value))
            .map(|literal| FilterValue::Enum((*literal).to_string()))
            .ok_or_else(|| {
                ValidationError::new(name, format!("Must be one of {}", allowed.join(", ")))
            }),
        FieldKind::Integer => parse_typed::<i64>(name, kind, value).map(FilterValue::Integer),
        FieldKind::Decimal => parse_typed::<Decimal>(name, kind, value).map(FilterValue::Decimal),
        FieldKind::Timestamp => parse_timestamp(value, Bound::Min)
            .map(FilterValue::Timestamp)
            .ok_or_else(|| mismatch(name, kind)),
        FieldKind::IntegerRange | FieldKind::DecimalRange | FieldKind::TimestampRange => {
            Err(mismatch(name, kind))
        }
    }
}

fn parse_range(
    name: &str,
    kind: FieldKind,
    min: Option<&str>,
    max: Option<&str>,
) -> Result<FilterValue, ValidationError> {
    let min_key = format!("{name}{RANGE_MIN_SUFFIX}");
    let max_key = format!("{name}{RANGE_MAX_SUFFIX}");

    match kind {
        FieldKind::IntegerRange => Ok(FilterValue::IntegerRange(Range::new(
            min.map(|v| parse_typed(&min_key, kind, v)).transpose()?,
            max.map(|v| parse_typed(&max_key, kind, v)).transpose()?,
        ))),
        FieldKind::DecimalRange => Ok(FilterValue::DecimalRange(Range::new(
            min.map(|v| parse_typed(&min_key, kind, v)).transpose()?,
            max.map(|v| parse_typed(&max_key, kind, v)).transpose()?,
        ))),
        FieldKind::TimestampRange => {
            let timestamp = |key: &str, value: &str, bound: Bound| {
                parse_timestamp(value, bound).ok_or_else(|| mismatch(key, kind))
            };
            Ok(FilterValue::TimestampRange(Range::new(
                min.map(|v| timestamp(&min_key, v, Bound::Min)).transpose()?,
                max.map(|v| timestamp(&max_key, v, Bound::Max)).transpose()?,
            )))
        }
        _ => Err(mismatch(name, kind)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]`, or a bare date.
///
/// A bare date used as an upper bound covers the whole day.
fn parse_timestamp(value: &str, bound: Bound) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }
    if let Ok(naive) = NaiveDateTime::from_str(value) {
        return Some(naive);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = match bound {
        Bound::Min => NaiveTime::MIN,
        Bound::Max => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?,
    };
    Some(date.and_time(time))
}
