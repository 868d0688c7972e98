use academy_search::{FieldDef, FieldKind, SearchResource};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use super::class_professor::PROFESSOR_CLASSES;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "professors")]
#[schema(as = Professor)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub dni: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SearchResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "professor";
    const RESOURCE_NAME_PLURAL: &'static str = "professors";
    const RESOURCE_DESCRIPTION: &'static str = "Teaching staff accounts.";

    fn fields() -> Vec<FieldDef<Self::ColumnType>> {
        vec![
            FieldDef::new("id", Column::Id, FieldKind::Uuid).sortable(),
            FieldDef::normalized("first_name", Column::FirstName)
                .searchable()
                .sortable(),
            FieldDef::normalized("last_name", Column::LastName)
                .searchable()
                .sortable(),
            FieldDef::normalized("username", Column::Username)
                .searchable()
                .sortable(),
            FieldDef::case_insensitive("email", Column::Email).searchable(),
            FieldDef::case_insensitive("dni", Column::Dni).searchable(),
            FieldDef::new("enabled", Column::Enabled, FieldKind::Bool),
            FieldDef::new("class_id", Column::Id, FieldKind::LinkedTo(PROFESSOR_CLASSES)),
            FieldDef::new("has_no_classes", Column::Id, FieldKind::Unlinked(PROFESSOR_CLASSES)),
        ]
    }
}

academy_search::search_handlers!(Model);
