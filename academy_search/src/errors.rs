//! # Error Handling for Search APIs
//!
//! Two layers:
//! - [`SearchError`] is what the core returns: a rejected request or a storage failure.
//! - [`ApiError`] is what handlers return: it picks the HTTP status, logs the
//!   internal details and sends a sanitized body.
//!
//! **Never expose internal errors to users.** Storage errors are logged
//! server-side through `tracing` and replaced by a generic message.
//!
//! ```rust,ignore
//! use academy_search::ApiError;
//!
//! async fn handler(...) -> Result<Json<PagedResult<Model>>, ApiError> {
//!     let spec = SearchParams::parse(&raw, fields, &config)?; // 400
//!     let page = Student::search(&db, &normalization, &spec).await?; // 500 on DbErr
//!     Ok(Json(page))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::validation::ValidationError;

/// Failure of a single search request.
#[derive(Debug)]
pub enum SearchError {
    /// The request was rejected before any query was issued.
    Validation(ValidationError),
    /// The storage layer failed; passed through unmodified.
    Storage(DbErr),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid search request: {err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for SearchError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::Storage(err)
    }
}

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - the query string could not be read at all
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 400 Bad Request - one or more search parameters were rejected
    InvalidSearch {
        /// Offending parameters, sent back as `details`
        errors: Vec<ValidationError>,
    },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a 400 error listing the rejected parameters
    #[must_use]
    pub fn invalid_search(errors: Vec<ValidationError>) -> Self {
        Self::InvalidSearch { errors }
    }

    /// Create a 500 Internal Server Error from a database error
    ///
    /// The database error details are logged but NOT sent to the user.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::InvalidSearch { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message (sanitized)
    fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message } | Self::Database { message, .. } => message.clone(),
            Self::InvalidSearch { errors } => match errors.as_slice() {
                [single] => single.to_string(),
                _ => "Invalid search request".to_string(),
            },
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Search request rejected"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    /// Error message
    error: String,
    /// Rejected parameters, one entry per field
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::InvalidSearch { errors } => ErrorResponse {
                error: self.user_message(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_search(vec![err])
    }
}

/// All storage errors become a 500; the details only reach the log.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(err) => err.into(),
            SearchError::Storage(err) => err.into(),
        }
    }
}
