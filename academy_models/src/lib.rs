//! Academy domain entities and their search endpoints.
//!
//! Every entity module declares its Sea-ORM model, its searchable field schema
//! and a `router()` generated by [`academy_search::search_handlers!`].

pub mod class;
pub mod class_professor;
pub mod exercise;
pub mod material;
pub mod professor;
pub mod student;

use academy_search::SearchState;
use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub use class::{
    Difficulty, Entity as ClassEntity, Format, Model as ClassModel,
    ActiveModel as ClassActiveModel, Column as ClassColumn,
};
pub use class_professor::{
    ActiveModel as ClassProfessorActiveModel, Column as ClassProfessorColumn,
    Entity as ClassProfessorEntity, Model as ClassProfessorModel,
};
pub use exercise::{
    ActiveModel as ExerciseActiveModel, Column as ExerciseColumn, Entity as ExerciseEntity,
    Model as ExerciseModel,
};
pub use material::{
    ActiveModel as MaterialActiveModel, Column as MaterialColumn, Entity as MaterialEntity,
    Model as MaterialModel,
};
pub use professor::{
    ActiveModel as ProfessorActiveModel, Column as ProfessorColumn, Entity as ProfessorEntity,
    Model as ProfessorModel,
};
pub use student::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as StudentEntity,
    Model as StudentModel,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "Academy search API",
    description = "Accent-insensitive search over the academy's records"
))]
struct ApiDoc;

/// All search endpoints, still carrying their OpenAPI description.
pub fn api_router() -> OpenApiRouter<SearchState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/students", student::router())
        .nest("/professors", professor::router())
        .nest("/classes", class::router())
        .nest("/materials", material::router())
        .nest("/exercises", exercise::router())
}

/// Ready-to-serve router with `GET /students`, `/professors`, `/classes`,
/// `/materials` and `/exercises`.
pub fn router(state: SearchState) -> Router {
    let (router, _) = api_router().split_for_parts();
    router.with_state(state)
}

/// The OpenAPI document of every search endpoint.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_, api) = api_router().split_for_parts();
    api
}
