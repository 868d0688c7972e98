use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};

use super::schema::TextMatch;
use crate::normalization::{TextNormalization, normalize_str};

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so user input only ever matches literally.
/// Escapes: `\` first, then `%` (match any) and `_` (match single char)
#[must_use]
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `%term%` with the term escaped.
#[must_use]
pub fn contains_pattern(folded_term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_wildcards(folded_term))).escape(LIKE_ESCAPE)
}

/// Fold a term for comparison against a column of the given match kind.
///
/// Returns `None` for terms that are blank after folding, or that
/// [`normalize_str`] reduces to nothing; those do not restrict.
#[must_use]
pub fn fold_for(normalization: &TextNormalization, matching: TextMatch, term: &str) -> Option<String> {
    if normalize_str(term).is_empty() {
        return None;
    }
    let folded = match matching {
        TextMatch::Normalized => normalization.fold_term(term),
        TextMatch::CaseInsensitive => term.trim().to_lowercase(),
    };
    Some(folded).filter(|folded| !folded.is_empty())
}

/// `fold(column) LIKE '%term%' ESCAPE '\'`, where `term` is already folded.
#[must_use]
pub fn text_contains(
    normalization: &TextNormalization,
    matching: TextMatch,
    column: SimpleExpr,
    folded_term: &str,
) -> SimpleExpr {
    let folded_column = match matching {
        TextMatch::Normalized => normalization.storage_expr(column),
        TextMatch::CaseInsensitive => Func::lower(column).into(),
    };
    Expr::expr(folded_column).like(contains_pattern(folded_term))
}
