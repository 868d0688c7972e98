//! Validation Support
//!
//! Every rejected search request carries a [`ValidationError`] naming the
//! offending parameter, so clients can tell `size` problems apart from a
//! mistyped filter.
//!
//! # Example
//!
//! ```rust,ignore
//! use academy_search::validation::{ValidationError, validators};
//!
//! validators::validate_range("size", size, Some(1), Some(config.max_page_size))?;
//! return Err(ValidationError::new("sort_by", "Unknown sort field 'salary'"));
//! ```

use serde::Serialize;
use std::fmt;

/// Validation error with field name and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The parameter that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Helper validators for common patterns
pub mod validators {
    use super::ValidationError;
    use std::fmt;

    /// Validate string length (in characters) does not exceed `max`
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for `field` when the value is too long.
    pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
        if value.chars().count() > max {
            return Err(ValidationError::new(
                field,
                format!("Must be at most {max} characters"),
            ));
        }
        Ok(())
    }

    /// Validate number is within range
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for `field` when the value is out of bounds.
    pub fn validate_range<T: PartialOrd + fmt::Display>(
        field: &str,
        value: T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<(), ValidationError> {
        if let Some(min_val) = min
            && value < min_val
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at least {min_val}"),
            ));
        }

        if let Some(max_val) = max
            && value > max_val
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at most {max_val}"),
            ));
        }

        Ok(())
    }
}
