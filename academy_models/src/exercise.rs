use academy_search::{FieldDef, FieldKind, SearchResource};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "exercises")]
#[schema(as = Exercise)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub statement: String,
    pub class_id: Uuid,
    pub start_date: DateTime,
    pub end_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SearchResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "exercise";
    const RESOURCE_NAME_PLURAL: &'static str = "exercises";
    const RESOURCE_DESCRIPTION: &'static str =
        "Exercises attached to a class, with an open submission window. `status` is ACTIVE, EXPIRED or FUTURE relative to now.";

    fn fields() -> Vec<FieldDef<Self::ColumnType>> {
        vec![
            FieldDef::new("id", Column::Id, FieldKind::Uuid).sortable(),
            FieldDef::normalized("name", Column::Name)
                .searchable()
                .sortable(),
            FieldDef::normalized("statement", Column::Statement).searchable(),
            FieldDef::new("class_id", Column::ClassId, FieldKind::Uuid),
            FieldDef::new("start_date", Column::StartDate, FieldKind::TimestampRange).sortable(),
            FieldDef::new("end_date", Column::EndDate, FieldKind::TimestampRange).sortable(),
            FieldDef::window_status("status", Column::StartDate, Column::EndDate),
        ]
    }
}

academy_search::search_handlers!(Model);
