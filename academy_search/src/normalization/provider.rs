use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr,
    sea_query::{Alias, Expr, Func, Query, SimpleExpr},
};
use std::fmt;

use super::fallback::{apply_fallback, inline_fallback_expr, postgres_fallback_function_sql};
use super::normalize_str;

/// Name of the storage-side function every accent-insensitive predicate calls.
pub const NORMALIZE_FUNCTION: &str = "normalize_text";

const CREATE_UNACCENT_EXTENSION: &str = "CREATE EXTENSION IF NOT EXISTS unaccent";

const CREATE_NATIVE_FUNCTION: &str = "CREATE OR REPLACE FUNCTION normalize_text(input_text TEXT)\n\
     RETURNS TEXT AS $$\n    SELECT TRIM(LOWER(unaccent(input_text)))\n$$ LANGUAGE sql IMMUTABLE STRICT";

/// Inputs every tier must fold exactly like [`normalize_str`] before it is accepted.
pub const VERIFICATION_SAMPLES: &[&str] = &[
    "José",
    "ÁNGEL GARCÍA",
    " Muñoz Ibáñez ",
    "pingüino",
    "Çà et là",
    "plain ascii",
];

/// Which storage normalization the composer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalizationMode {
    /// Extension-backed (or host-registered) `normalize_text`.
    Native,
    /// Substitution-table folding, installed as a function or rendered inline.
    Fallback,
    /// Case-only matching; accents are significant.
    Unavailable,
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Native => "native",
            Self::Fallback => "fallback",
            Self::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// Outcome of the startup negotiation, injected into every query composition.
///
/// The value is `Copy` and immutable: it is decided once by
/// [`NormalizationProvider::initialize`] and then shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalization {
    mode: NormalizationMode,
    backend: DatabaseBackend,
}

impl TextNormalization {
    #[must_use]
    pub const fn new(mode: NormalizationMode, backend: DatabaseBackend) -> Self {
        Self { mode, backend }
    }

    #[must_use]
    pub const fn mode(&self) -> NormalizationMode {
        self.mode
    }

    #[must_use]
    pub const fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    #[must_use]
    pub const fn is_accent_insensitive(&self) -> bool {
        !matches!(self.mode, NormalizationMode::Unavailable)
    }

    /// Wrap a storage expression in the negotiated normalization.
    #[must_use]
    pub fn storage_expr(&self, expr: SimpleExpr) -> SimpleExpr {
        match (self.mode, self.backend) {
            (NormalizationMode::Native, _) | (NormalizationMode::Fallback, DatabaseBackend::Postgres) => {
                Func::cust(Alias::new(NORMALIZE_FUNCTION)).arg(expr).into()
            }
            (NormalizationMode::Fallback, _) => inline_fallback_expr(expr),
            (NormalizationMode::Unavailable, _) => Func::lower(expr).into(),
        }
    }

    /// Fold a user term the same way [`Self::storage_expr`] folds the column.
    ///
    /// `Fallback` runs the substitution table in process rather than
    /// [`normalize_str`], so letters the table does not cover stay on both sides.
    #[must_use]
    pub fn fold_term(&self, term: &str) -> String {
        match self.mode {
            NormalizationMode::Native => normalize_str(term),
            NormalizationMode::Fallback => apply_fallback(term, self.backend),
            NormalizationMode::Unavailable => term.trim().to_lowercase(),
        }
    }
}

/// Negotiates the storage normalization tier at startup.
pub struct NormalizationProvider;

impl NormalizationProvider {
    /// Startup hook: try native, then fallback, then degrade.
    ///
    /// Never fails. Every error is logged and downgrades the mode instead of
    /// aborting boot.
    pub async fn initialize<C: ConnectionTrait>(db: &C) -> TextNormalization {
        let backend = db.get_database_backend();

        match Self::provision_native(db, backend).await {
            Ok(normalization) => {
                tracing::info!(?backend, mode = %normalization.mode(), "accent-insensitive search enabled");
                return normalization;
            }
            Err(err) => {
                tracing::warn!(
                    ?backend,
                    error = %err,
                    "native text normalization unavailable, installing fallback"
                );
            }
        }

        match Self::provision_fallback(db, backend).await {
            Ok(normalization) => {
                tracing::info!(?backend, mode = %normalization.mode(), "accent-insensitive search enabled");
                normalization
            }
            Err(err) => {
                tracing::warn!(
                    ?backend,
                    error = %err,
                    "no text normalization could be provisioned; searches fall back to case-only matching"
                );
                TextNormalization::new(NormalizationMode::Unavailable, backend)
            }
        }
    }

    async fn provision_native<C: ConnectionTrait>(
        db: &C,
        backend: DatabaseBackend,
    ) -> Result<TextNormalization, DbErr> {
        if backend == DatabaseBackend::Postgres {
            db.execute_unprepared(CREATE_UNACCENT_EXTENSION).await?;
            db.execute_unprepared(CREATE_NATIVE_FUNCTION).await?;
        }
        // Other engines can only use a function the host registered on the connection.
        let candidate = TextNormalization::new(NormalizationMode::Native, backend);
        verify(db, candidate).await?;
        Ok(candidate)
    }

    async fn provision_fallback<C: ConnectionTrait>(
        db: &C,
        backend: DatabaseBackend,
    ) -> Result<TextNormalization, DbErr> {
        if backend == DatabaseBackend::Postgres {
            db.execute_unprepared(&postgres_fallback_function_sql()).await?;
        }
        let candidate = TextNormalization::new(NormalizationMode::Fallback, backend);
        verify(db, candidate).await?;
        Ok(candidate)
    }
}

/// Fold a single value on the storage side with the given normalization.
///
/// # Errors
///
/// Returns the storage error if the expression cannot be evaluated.
pub async fn storage_normalize<C: ConnectionTrait>(
    db: &C,
    normalization: &TextNormalization,
    text: &str,
) -> Result<Option<String>, DbErr> {
    let select = Query::select()
        .expr_as(
            normalization.storage_expr(Expr::val(text).into()),
            Alias::new("normalized"),
        )
        .to_owned();
    let statement = db.get_database_backend().build(&select);

    match db.query_one(statement).await? {
        Some(row) => row.try_get::<Option<String>>("", "normalized"),
        None => Ok(None),
    }
}

/// Reject a tier whose output disagrees with the in-process normalizer.
async fn verify<C: ConnectionTrait>(db: &C, candidate: TextNormalization) -> Result<(), DbErr> {
    for sample in VERIFICATION_SAMPLES {
        let stored = storage_normalize(db, &candidate, sample).await?;
        let expected = normalize_str(sample);
        if stored.as_deref() != Some(expected.as_str()) {
            return Err(DbErr::Custom(format!(
                "{} normalization disagrees on {sample:?}: storage returned {stored:?}, expected {expected:?}",
                candidate.mode()
            )));
        }
    }
    Ok(())
}
