use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, IdenStatic, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::Order,
};

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::filtering::{FieldDef, FilterSpec, QueryComposer, page_window, resolve_sort};
use crate::normalization::TextNormalization;
use crate::pagination::PagedResult;

/// A persisted record that can be searched through its declared field schema.
///
/// Implemented on the Sea-ORM `Model`; only [`Self::fields`] and the constants
/// need to be written per entity.
#[async_trait]
pub trait SearchResource: FromQueryResult + Sized + Send + Sync + 'static {
    type EntityType: EntityTrait<Model = Self> + Sync;
    type ColumnType: ColumnTrait + Copy + Send + Sync + std::fmt::Debug;

    const ID_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    /// Every filterable and sortable field, with its general-term flag.
    fn fields() -> Vec<FieldDef<Self::ColumnType>>;

    /// Run one search: validate, compose, count and fetch the page.
    ///
    /// The count and the page are two round trips over the same condition;
    /// concurrent writes between them can make them disagree slightly.
    ///
    /// # Errors
    ///
    /// [`SearchError::Validation`] before any query is issued when the filter spec
    /// does not fit the field schema; [`SearchError::Storage`] unchanged from
    /// the database.
    async fn search(
        db: &DatabaseConnection,
        normalization: &TextNormalization,
        config: &SearchConfig,
        spec: &FilterSpec,
    ) -> Result<PagedResult<Self>, SearchError> {
        let fields = Self::fields();
        spec.validate(&fields, config)?;

        let sort = resolve_sort(spec, &fields, Self::ID_COLUMN)?;
        let (offset, limit) = page_window(spec.page, spec.page_size)?;
        let condition = QueryComposer::new(&fields, *normalization).condition(spec);

        let count_query = Self::EntityType::find().filter(condition.clone());
        let total = PaginatorTrait::count(count_query, db).await?;

        let content = if offset >= total {
            Vec::new()
        } else {
            let mut query = Self::EntityType::find()
                .filter(condition)
                .order_by(sort.column, sort.order);
            // Stable paging when the sort field has duplicates
            if sort.column.as_str() != Self::ID_COLUMN.as_str() {
                query = query.order_by(Self::ID_COLUMN, Order::Asc);
            }
            query.offset(offset).limit(limit).all(db).await?
        };

        tracing::debug!(
            resource = Self::RESOURCE_NAME_PLURAL,
            page = spec.page,
            size = spec.page_size,
            total,
            returned = content.len(),
            "search executed"
        );

        Ok(PagedResult::for_spec(content, spec, total, sort.name))
    }
}
