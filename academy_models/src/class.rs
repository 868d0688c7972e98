use academy_search::{FieldDef, FieldKind, SearchResource};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a class is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Format {
    #[sea_orm(string_value = "ONLINE")]
    Online,
    #[sea_orm(string_value = "PRESENCIAL")]
    Presencial,
}

impl Format {
    pub const LITERALS: &'static [&'static str] = &["ONLINE", "PRESENCIAL"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[sea_orm(string_value = "PRINCIPIANTE")]
    Principiante,
    #[sea_orm(string_value = "INTERMEDIO")]
    Intermedio,
    #[sea_orm(string_value = "AVANZADO")]
    Avanzado,
}

impl Difficulty {
    pub const LITERALS: &'static [&'static str] = &["PRINCIPIANTE", "INTERMEDIO", "AVANZADO"];
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "classes")]
#[schema(as = Class)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: Decimal,
    pub format: Format,
    pub difficulty: Difficulty,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exercise::Entity")]
    Exercises,
}

impl Related<super::exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercises.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SearchResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "class";
    const RESOURCE_NAME_PLURAL: &'static str = "classes";
    const RESOURCE_DESCRIPTION: &'static str =
        "Courses offered by the academy, filterable by price band, format and difficulty.";

    fn fields() -> Vec<FieldDef<Self::ColumnType>> {
        vec![
            FieldDef::new("id", Column::Id, FieldKind::Uuid).sortable(),
            FieldDef::normalized("title", Column::Title)
                .searchable()
                .sortable(),
            FieldDef::normalized("description", Column::Description).searchable(),
            FieldDef::new("price", Column::Price, FieldKind::DecimalRange).sortable(),
            FieldDef::new("format", Column::Format, FieldKind::Enum(Format::LITERALS)),
            FieldDef::new(
                "difficulty",
                Column::Difficulty,
                FieldKind::Enum(Difficulty::LITERALS),
            )
            .sortable(),
        ]
    }
}

academy_search::search_handlers!(Model);
