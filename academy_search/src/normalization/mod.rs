//! # Accent-Insensitive Text Normalization
//!
//! Two halves that must agree with each other:
//!
//! - **[`normalize_str`]** folds text in process: lowercase, NFD, strip combining
//!   diacritical marks, trim. `"José"`, `"JOSE"` and `"jose"` all become `"jose"`.
//! - **[`NormalizationProvider`]** makes the database able to do the same fold
//!   inside `WHERE` clauses, so a record matches identically whether it is
//!   filtered by the database or checked in memory.
//!
//! ## Storage tiers
//!
//! The provider runs once at startup and settles on a [`NormalizationMode`]:
//!
//! | Mode | Postgres | SQLite / MySQL |
//! |------|----------|----------------|
//! | `Native` | `unaccent` extension wrapped in `normalize_text()` | host-registered `normalize_text()` |
//! | `Fallback` | `normalize_text()` built from a substitution table | the same table rendered inline as `REPLACE` calls |
//! | `Unavailable` | `LOWER()` only | `LOWER()` only |
//!
//! Each tier is checked against [`normalize_str`] on [`VERIFICATION_SAMPLES`]
//! before it is accepted.
//!
//! ```rust,ignore
//! let normalization = NormalizationProvider::initialize(&db).await;
//! // pass `normalization` by value/reference to every search
//! ```

pub mod fallback;
pub mod normalizer;
pub mod provider;

pub use fallback::apply_fallback;
pub use normalizer::{contains, equals, normalize, normalize_str, prepare_for_like};
pub use provider::{
    NORMALIZE_FUNCTION, NormalizationMode, NormalizationProvider, TextNormalization,
    VERIFICATION_SAMPLES, storage_normalize,
};
