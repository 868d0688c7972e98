use sea_orm::ColumnTrait;

/// How a text column is compared against a user term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Accent- and case-insensitive containment through the storage normalization.
    Normalized,
    /// Case-insensitive containment only. Used for identifiers such as emails
    /// where accents never appear.
    CaseInsensitive,
}

/// Storage type of a filterable field, which decides how its value is parsed
/// and which predicate it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextMatch),
    Bool,
    Uuid,
    /// Closed set of canonical literals, matched exactly.
    Enum(&'static [&'static str]),
    Integer,
    Decimal,
    Timestamp,
    /// Filtered through `<name>_min` / `<name>_max`, both inclusive.
    IntegerRange,
    DecimalRange,
    TimestampRange,
    /// `ACTIVE`, `EXPIRED` or `FUTURE` relative to the request time, derived
    /// from the field's column (start) and [`FieldDef::end_column`].
    WindowStatus,
    /// The record has a row in the link table pointing at the given id.
    LinkedTo(LinkTable),
    /// `true` keeps records without any row in the link table; `false` does not restrict.
    Unlinked(LinkTable),
}

/// Many-to-many link table, e.g. `class_professors(class_id, professor_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTable {
    pub table: &'static str,
    /// Column referencing the searched record's id.
    pub owner: &'static str,
    /// Column referencing the linked record's id.
    pub target: &'static str,
}

/// Lifecycle of a `[start, end]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStatus {
    /// `start <= now <= end`
    Active,
    /// `end < now`
    Expired,
    /// `now < start`
    Future,
}

impl WindowStatus {
    pub const LITERALS: &'static [&'static str] = &["ACTIVE", "EXPIRED", "FUTURE"];

    #[must_use]
    pub fn from_literal(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("ACTIVE") => Some(Self::Active),
            v if v.eq_ignore_ascii_case("EXPIRED") => Some(Self::Expired),
            v if v.eq_ignore_ascii_case("FUTURE") => Some(Self::Future),
            _ => None,
        }
    }
}

impl FieldKind {
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(
            self,
            Self::IntegerRange | Self::DecimalRange | Self::TimestampRange
        )
    }

    /// Short description used in validation messages.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool | Self::Unlinked(_) => "a boolean (true or false)",
            Self::Uuid | Self::LinkedTo(_) => "a UUID",
            Self::WindowStatus => "one of ACTIVE, EXPIRED, FUTURE",
            Self::Enum(_) => "one of the allowed values",
            Self::Integer | Self::IntegerRange => "an integer",
            Self::Decimal | Self::DecimalRange => "a decimal number",
            Self::Timestamp | Self::TimestampRange => {
                "a date (YYYY-MM-DD) or timestamp (YYYY-MM-DDTHH:MM:SS)"
            }
        }
    }
}

/// One entry of an entity's declared field schema.
///
/// Only fields listed here can be filtered or sorted on; request input is
/// resolved against `name` and never reaches the query as a column name.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef<C> {
    /// Public name used in query strings and in `sortBy`.
    pub name: &'static str,
    pub column: C,
    pub kind: FieldKind,
    /// Part of the OR-group the general term is matched against.
    pub searchable: bool,
    pub sortable: bool,
    /// Window end for [`FieldKind::WindowStatus`]; `column` is the start.
    pub end_column: Option<C>,
}

impl<C: ColumnTrait + Copy> FieldDef<C> {
    pub const fn new(name: &'static str, column: C, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            searchable: false,
            sortable: false,
            end_column: None,
        }
    }

    /// Derived status of the `[start, end]` window held in two columns.
    pub const fn window_status(name: &'static str, start: C, end: C) -> Self {
        Self {
            name,
            column: start,
            kind: FieldKind::WindowStatus,
            searchable: false,
            sortable: false,
            end_column: Some(end),
        }
    }

    /// Text field compared through the storage normalization.
    pub const fn normalized(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Text(TextMatch::Normalized))
    }

    /// Text field compared case-insensitively.
    pub const fn case_insensitive(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Text(TextMatch::CaseInsensitive))
    }

    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Look up a declared field by its public name.
pub fn find_field<'a, C>(fields: &'a [FieldDef<C>], name: &str) -> Option<&'a FieldDef<C>> {
    fields.iter().find(|field| field.name == name)
}

/// Names of the fields the general term is matched against.
pub fn searchable_names<C>(fields: &[FieldDef<C>]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.searchable && field.kind.is_text())
        .map(|field| field.name)
        .collect()
}

/// Names accepted by `sort_by`.
pub fn sortable_names<C>(fields: &[FieldDef<C>]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.sortable)
        .map(|field| field.name)
        .collect()
}
