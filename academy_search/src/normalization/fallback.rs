//! Character substitution table used when the storage engine has no native
//! accent-folding capability.
//!
//! The same table drives both the Postgres fallback function and the inline
//! `REPLACE` chain used on engines that cannot define SQL functions, so the two
//! renderings cannot drift apart.

use sea_orm::{
    DatabaseBackend,
    sea_query::{Alias, Expr, Func, SimpleExpr},
};

/// `(from, to)` pairs applied before lowercasing.
pub const FALLBACK_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("á", "a"), ("é", "e"), ("í", "i"), ("ó", "o"), ("ú", "u"),
    ("Á", "a"), ("É", "e"), ("Í", "i"), ("Ó", "o"), ("Ú", "u"),
    ("à", "a"), ("è", "e"), ("ì", "i"), ("ò", "o"), ("ù", "u"),
    ("À", "a"), ("È", "e"), ("Ì", "i"), ("Ò", "o"), ("Ù", "u"),
    ("â", "a"), ("ê", "e"), ("î", "i"), ("ô", "o"), ("û", "u"),
    ("Â", "a"), ("Ê", "e"), ("Î", "i"), ("Ô", "o"), ("Û", "u"),
    ("ä", "a"), ("ë", "e"), ("ï", "i"), ("ö", "o"), ("ü", "u"),
    ("Ä", "a"), ("Ë", "e"), ("Ï", "i"), ("Ö", "o"), ("Ü", "u"),
    ("ã", "a"), ("õ", "o"), ("Ã", "a"), ("Õ", "o"),
    ("ñ", "n"), ("Ñ", "n"),
    ("ç", "c"), ("Ç", "c"),
    // free-standing combining marks left over from decomposed input
    ("\u{0300}", ""), ("\u{0301}", ""), ("\u{0302}", ""),
    ("\u{0303}", ""), ("\u{0308}", ""), ("\u{0327}", ""),
];

/// `TRIM(LOWER(REPLACE(...REPLACE(expr, 'á', 'a')..., 'ç', 'c')))`
#[must_use]
pub fn inline_fallback_expr(expr: SimpleExpr) -> SimpleExpr {
    let replaced = FALLBACK_SUBSTITUTIONS.iter().fold(expr, |acc, (from, to)| {
        Func::cust(Alias::new("REPLACE"))
            .arg(acc)
            .arg(Expr::val(*from))
            .arg(Expr::val(*to))
            .into()
    });

    Func::cust(Alias::new("TRIM"))
        .arg(Func::lower(replaced))
        .into()
}

/// Fold `text` in process exactly as the fallback expression folds a column on `backend`.
///
/// SQLite's `LOWER` only folds ASCII letters, so letters outside the table keep
/// their case there. Both sides of a fallback `LIKE` go through the same steps,
/// which keeps a stored value matchable by itself even when the table does not
/// cover one of its letters.
#[must_use]
pub fn apply_fallback(text: &str, backend: DatabaseBackend) -> String {
    let replaced = FALLBACK_SUBSTITUTIONS
        .iter()
        .fold(text.trim().to_string(), |acc, (from, to)| acc.replace(from, to));
    let lowered = match backend {
        DatabaseBackend::Sqlite => replaced.to_ascii_lowercase(),
        _ => replaced.to_lowercase(),
    };
    lowered.trim_matches(' ').to_string()
}

/// Render a literal for embedding in DDL. Combining marks go through `chr()`
/// so the function body stays printable.
fn pg_literal(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ('\u{0300}'..='\u{036F}').contains(&c) => format!("chr({})", c as u32),
        _ => format!("'{}'", text.replace('\'', "''")),
    }
}

/// Body of the Postgres `normalize_text` function built from the table.
#[must_use]
pub fn postgres_fallback_function_sql() -> String {
    let replaced = FALLBACK_SUBSTITUTIONS
        .iter()
        .fold("input_text".to_string(), |acc, (from, to)| {
            format!("REPLACE({acc}, {}, {})", pg_literal(from), pg_literal(to))
        });

    format!(
        "CREATE OR REPLACE FUNCTION normalize_text(input_text TEXT)\n\
         RETURNS TEXT AS $$\n    SELECT TRIM(LOWER({replaced}))\n$$ LANGUAGE sql IMMUTABLE STRICT"
    )
}
