/// Generate a documented `search_handler` and a `router()` for one resource.
///
/// The calling crate needs `utoipa`, `utoipa-axum` and `axum` in scope.
///
/// ```rust,ignore
/// pub mod student {
///     // entity definition, SearchResource impl ...
///     academy_search::search_handlers!(Model);
/// }
///
/// let app = OpenApiRouter::new().nest("/students", student::router());
/// ```
#[macro_export]
macro_rules! search_handlers {
    ($resource:ty) => {
        use academy_search::PagedResult;

        #[utoipa::path(
            get,
            path = "/",
            responses(
                (status = axum::http::StatusCode::OK, description = "One page of matching records", body = PagedResult<$resource>),
                (status = axum::http::StatusCode::BAD_REQUEST, description = "Unknown filter, unknown sort field or malformed value"),
                (status = axum::http::StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error")
            ),
            params(academy_search::models::SearchParams),
            operation_id = format!("search_{}", <$resource as academy_search::SearchResource>::RESOURCE_NAME_PLURAL),
            summary = format!("Search {}", <$resource as academy_search::SearchResource>::RESOURCE_NAME_PLURAL),
            description = format!(
                "Searches {}.\n\n{}\n\nGeneral term fields: {}.\n\nFilterable fields: {}.\n\nSortable fields: {}.",
                <$resource as academy_search::SearchResource>::RESOURCE_NAME_PLURAL,
                <$resource as academy_search::SearchResource>::RESOURCE_DESCRIPTION,
                academy_search::filtering::searchable_names(&<$resource as academy_search::SearchResource>::fields()).join(", "),
                <$resource as academy_search::SearchResource>::fields()
                    .iter()
                    .map(|field| if field.kind.is_range() {
                        format!("\n- {0}_min, {0}_max", field.name)
                    } else {
                        format!("\n- {}", field.name)
                    })
                    .collect::<Vec<String>>()
                    .join(""),
                academy_search::filtering::sortable_names(&<$resource as academy_search::SearchResource>::fields()).join(", ")
            )
        )]
        pub async fn search_handler(
            state: axum::extract::State<academy_search::SearchState>,
            query: Result<
                axum::extract::Query<std::collections::HashMap<String, String>>,
                axum::extract::rejection::QueryRejection,
            >,
        ) -> Result<axum::Json<PagedResult<$resource>>, academy_search::ApiError> {
            academy_search::core::handlers::search_handler::<$resource>(state, query).await
        }

        /// Router with the search endpoint mounted at `/`.
        pub fn router() -> utoipa_axum::router::OpenApiRouter<academy_search::SearchState> {
            utoipa_axum::router::OpenApiRouter::new()
                .routes(utoipa_axum::routes!(search_handler))
        }
    };
}
