//! Search limits.
//!
//! ```rust,ignore
//! let config = SearchConfig::from_env();
//! ```

use serde::Deserialize;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_TERM_LENGTH: usize = 10_000;

const ENV_DEFAULT_PAGE_SIZE: &str = "ACADEMY_SEARCH_DEFAULT_PAGE_SIZE";
const ENV_MAX_PAGE_SIZE: &str = "ACADEMY_SEARCH_MAX_PAGE_SIZE";
const ENV_MAX_TERM_LENGTH: &str = "ACADEMY_SEARCH_MAX_TERM_LENGTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size used when a request does not name one.
    pub default_page_size: u64,
    /// Largest accepted `size`. Larger requests are rejected, not clamped.
    pub max_page_size: u64,
    /// Longest accepted general term or text filter, in characters.
    pub max_term_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            max_term_length: MAX_TERM_LENGTH,
        }
    }
}

impl SearchConfig {
    /// Read overrides from the environment, keeping defaults for anything unset
    /// or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_page_size = read(&lookup, ENV_MAX_PAGE_SIZE, defaults.max_page_size).max(1);
        let default_page_size =
            read(&lookup, ENV_DEFAULT_PAGE_SIZE, defaults.default_page_size).clamp(1, max_page_size);
        let max_term_length = read(&lookup, ENV_MAX_TERM_LENGTH, defaults.max_term_length);

        Self {
            default_page_size,
            max_page_size,
            max_term_length,
        }
    }
}

fn read<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable search setting");
            default
        }),
        None => default,
    }
}
