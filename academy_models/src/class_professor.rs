use academy_search::filtering::LinkTable;
use sea_orm::entity::prelude::*;

/// Which professors teach which classes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "class_professors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub professor_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id"
    )]
    Professor,
}

impl ActiveModelBehavior for ActiveModel {}

/// Seen from the professor side: owner `professor_id`, target `class_id`.
pub const PROFESSOR_CLASSES: LinkTable = LinkTable {
    table: "class_professors",
    owner: "professor_id",
    target: "class_id",
};
