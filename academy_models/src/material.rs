use academy_search::{FieldDef, FieldKind, SearchResource};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "materials")]
#[schema(as = Material)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SearchResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "material";
    const RESOURCE_NAME_PLURAL: &'static str = "materials";

    fn fields() -> Vec<FieldDef<Self::ColumnType>> {
        vec![
            FieldDef::new("id", Column::Id, FieldKind::Uuid).sortable(),
            FieldDef::normalized("name", Column::Name)
                .searchable()
                .sortable(),
            FieldDef::case_insensitive("url", Column::Url).searchable(),
        ]
    }
}

academy_search::search_handlers!(Model);
