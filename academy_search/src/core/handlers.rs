use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use super::traits::SearchResource;
use crate::config::SearchConfig;
use crate::errors::ApiError;
use crate::models::SearchParams;
use crate::normalization::TextNormalization;
use crate::pagination::PagedResult;

/// Axum state shared by every search endpoint.
///
/// `normalization` is decided once at startup and only read afterwards.
#[derive(Clone, Debug)]
pub struct SearchState {
    pub db: DatabaseConnection,
    pub normalization: TextNormalization,
    pub config: SearchConfig,
}

impl SearchState {
    #[must_use]
    pub const fn new(
        db: DatabaseConnection,
        normalization: TextNormalization,
        config: SearchConfig,
    ) -> Self {
        Self {
            db,
            normalization,
            config,
        }
    }
}

/// Parse a raw query map for `T` and run the search.
///
/// # Errors
///
/// 400 for rejected parameters, 500 for storage failures.
pub async fn search_resource<T: SearchResource>(
    state: &SearchState,
    raw: &HashMap<String, String>,
) -> Result<PagedResult<T>, ApiError> {
    let fields = T::fields();
    let spec = SearchParams::parse(raw, &fields, &state.config)?;
    Ok(T::search(&state.db, &state.normalization, &state.config, &spec).await?)
}

/// Generic `GET` handler behind every generated search endpoint.
///
/// # Errors
///
/// See [`search_resource`]; an unreadable query string is also a 400.
pub async fn search_handler<T>(
    State(state): State<SearchState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<PagedResult<T>>, ApiError>
where
    T: SearchResource + serde::Serialize,
{
    let Query(raw) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    search_resource::<T>(&state, &raw).await.map(Json)
}
