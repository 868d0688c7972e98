use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Alias, Expr, Query, SelectStatement, SimpleExpr, Value},
};

use super::filter_spec::{FilterSpec, FilterValue, Range};
use super::schema::{FieldDef, FieldKind, LinkTable, WindowStatus, find_field};
use super::search::{fold_for, text_contains};
use crate::normalization::{TextNormalization, normalize_str};

/// Turns a [`FilterSpec`] into a `WHERE` condition for one entity.
///
/// ```text
/// (term absent OR field_1 ~ term OR ... OR field_n ~ term)
///   AND (filter_1 absent OR matches(filter_1))
///   AND ...
/// ```
///
/// The filter spec is expected to have passed [`FilterSpec::validate`] against the
/// same fields; anything that still does not resolve is skipped.
pub struct QueryComposer<'a, C> {
    fields: &'a [FieldDef<C>],
    normalization: TextNormalization,
    /// Reference time for window status filters.
    now: NaiveDateTime,
}

impl<'a, C> QueryComposer<'a, C>
where
    C: ColumnTrait + Copy,
{
    #[must_use]
    pub fn new(fields: &'a [FieldDef<C>], normalization: TextNormalization) -> Self {
        Self {
            fields,
            normalization,
            now: Utc::now().naive_utc(),
        }
    }

    /// Evaluate window status filters at `now` instead of the current UTC time.
    #[must_use]
    pub const fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// The complete condition shared by the page query and the count query.
    #[must_use]
    pub fn condition(&self, spec: &FilterSpec) -> Condition {
        let mut condition = Condition::all();

        if let Some(general) = self.general_term_condition(spec) {
            condition = condition.add(general);
        }

        for (name, value) in spec.present_filters() {
            let Some(field) = find_field(self.fields, name) else {
                continue;
            };
            if let Some(predicate) = self.field_condition(field, value) {
                condition = condition.add(predicate);
            }
        }

        condition
    }

    /// OR-group of the general term over every searchable text field.
    ///
    /// A term that normalizes to nothing (only combining marks, say) is absent.
    fn general_term_condition(&self, spec: &FilterSpec) -> Option<Condition> {
        let term = spec
            .general_term()
            .filter(|term| !normalize_str(term).is_empty())?;

        let mut any = Condition::any();
        let mut matched_fields = 0;
        for field in self.fields.iter().filter(|f| f.searchable) {
            let FieldKind::Text(matching) = field.kind else {
                continue;
            };
            let Some(folded) = fold_for(&self.normalization, matching, term) else {
                continue;
            };
            any = any.add(text_contains(
                &self.normalization,
                matching,
                Expr::col(field.column).into(),
                &folded,
            ));
            matched_fields += 1;
        }

        if matched_fields == 0 {
            // Nothing to match the term against
            return Some(Condition::all().add(Expr::val(1).eq(0)));
        }
        Some(any)
    }

    fn field_condition(&self, field: &FieldDef<C>, value: &FilterValue) -> Option<Condition> {
        let column = || Expr::col(field.column);

        let predicate: SimpleExpr = match (field.kind, value) {
            (FieldKind::Text(matching), FilterValue::Text(term)) => {
                let folded = fold_for(&self.normalization, matching, term)?;
                text_contains(&self.normalization, matching, column().into(), &folded)
            }
            (FieldKind::Bool, FilterValue::Bool(flag)) => column().eq(*flag),
            (FieldKind::Uuid, FilterValue::Uuid(id)) => column().eq(*id),
            (FieldKind::Enum(_), FilterValue::Enum(literal)) => column().eq(literal.as_str()),
            (FieldKind::Integer, FilterValue::Integer(n)) => column().eq(*n),
            (FieldKind::Decimal, FilterValue::Decimal(d)) => column().eq(*d),
            (FieldKind::Timestamp, FilterValue::Timestamp(t)) => column().eq(*t),
            (FieldKind::IntegerRange, FilterValue::IntegerRange(range)) => {
                return range_condition(field.column, range);
            }
            (FieldKind::DecimalRange, FilterValue::DecimalRange(range)) => {
                return range_condition(field.column, range);
            }
            (FieldKind::TimestampRange, FilterValue::TimestampRange(range)) => {
                return range_condition(field.column, range);
            }
            (FieldKind::WindowStatus, FilterValue::WindowStatus(status)) => {
                return Some(window_condition(field.column, field.end_column?, *status, self.now));
            }
            (FieldKind::LinkedTo(link), FilterValue::Uuid(id)) => {
                let mut owners = link_owners(link);
                owners.and_where(Expr::col(Alias::new(link.target)).eq(*id));
                column().in_subquery(owners)
            }
            (FieldKind::Unlinked(link), FilterValue::Bool(true)) => {
                column().not_in_subquery(link_owners(link))
            }
            _ => return None,
        };

        Some(Condition::all().add(predicate))
    }
}

/// Where the request time falls relative to `[start, end]`, both inclusive.
fn window_condition<C>(start: C, end: C, status: WindowStatus, now: NaiveDateTime) -> Condition
where
    C: ColumnTrait + Copy,
{
    match status {
        WindowStatus::Active => Condition::all()
            .add(Expr::col(start).lte(now))
            .add(Expr::col(end).gte(now)),
        WindowStatus::Expired => Condition::all().add(Expr::col(end).lt(now)),
        WindowStatus::Future => Condition::all().add(Expr::col(start).gt(now)),
    }
}

/// `SELECT owner FROM link_table`
fn link_owners(link: LinkTable) -> SelectStatement {
    Query::select()
        .column(Alias::new(link.owner))
        .from(Alias::new(link.table))
        .to_owned()
}

/// `column >= min AND column <= max`, omitting open sides.
fn range_condition<C, T>(column: C, range: &Range<T>) -> Option<Condition>
where
    C: ColumnTrait + Copy,
    T: Into<Value> + Clone + PartialOrd,
{
    if range.is_unbounded() {
        return None;
    }

    let mut condition = Condition::all();
    if let Some(min) = &range.min {
        condition = condition.add(Expr::col(column).gte(min.clone()));
    }
    if let Some(max) = &range.max {
        condition = condition.add(Expr::col(column).lte(max.clone()));
    }
    Some(condition)
}
