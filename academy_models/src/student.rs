use academy_search::{FieldDef, FieldKind, SearchResource};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "students")]
#[schema(as = Student)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// National identity document.
    pub dni: String,
    pub email: String,
    pub enrolled: bool,
    pub enrolled_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SearchResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "student";
    const RESOURCE_NAME_PLURAL: &'static str = "students";
    const RESOURCE_DESCRIPTION: &'static str =
        "Students enrolled in the academy. Names match regardless of accents and case.";

    fn fields() -> Vec<FieldDef<Self::ColumnType>> {
        vec![
            FieldDef::new("id", Column::Id, FieldKind::Uuid).sortable(),
            FieldDef::normalized("first_name", Column::FirstName)
                .searchable()
                .sortable(),
            FieldDef::normalized("last_name", Column::LastName)
                .searchable()
                .sortable(),
            FieldDef::case_insensitive("dni", Column::Dni).searchable(),
            FieldDef::case_insensitive("email", Column::Email)
                .searchable()
                .sortable(),
            FieldDef::new("enrolled", Column::Enrolled, FieldKind::Bool),
            FieldDef::new("enrolled_at", Column::EnrolledAt, FieldKind::TimestampRange).sortable(),
        ]
    }
}

academy_search::search_handlers!(Model);
