use academy_models::{
    ClassActiveModel, ClassColumn, ClassEntity, ClassModel, ClassProfessorActiveModel,
    ClassProfessorColumn, ClassProfessorEntity, Difficulty, ExerciseActiveModel,
    ExerciseColumn, ExerciseEntity, ExerciseModel, Format, MaterialActiveModel, MaterialColumn,
    MaterialEntity, MaterialModel, ProfessorActiveModel, ProfessorColumn, ProfessorEntity,
    ProfessorModel, StudentActiveModel, StudentColumn, StudentEntity, StudentModel,
};
use academy_search::{NormalizationProvider, SearchConfig, SearchState, TextNormalization};
use axum::{Router, body::Body, http::Request};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Set,
};
use sea_orm_migration::prelude::*;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

// Global mutex to serialize database setup for PostgreSQL to avoid race conditions
static POSTGRES_SETUP_MUTEX: Mutex<()> = Mutex::const_new(());

// Helper function to get database URL from environment or default to SQLite
fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

// Cleanup function for persistent databases
async fn cleanup_test_tables(db: &DatabaseConnection) {
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS class_professors").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS exercises").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS materials").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS classes").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS professors").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS students").await;
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS seaql_migrations").await;
}

#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = get_test_database_url();

    if database_url.starts_with("postgres") {
        let _lock = POSTGRES_SETUP_MUTEX.lock().await;
        let db = Database::connect(&database_url).await?;
        cleanup_test_tables(&db).await;
        Migrator::up(&db, None).await?;
        Ok(db)
    } else {
        let db = Database::connect(&database_url).await?;

        // For persistent databases, clean up any existing tables
        if !database_url.starts_with("sqlite::memory:") {
            cleanup_test_tables(&db).await;
        }

        Migrator::up(&db, None).await?;
        Ok(db)
    }
}

/// Search state as the server builds it at startup.
#[allow(dead_code)]
pub async fn setup_search_state(db: DatabaseConnection) -> SearchState {
    let normalization: TextNormalization = NormalizationProvider::initialize(&db).await;
    SearchState::new(db, normalization, SearchConfig::default())
}

#[allow(dead_code)]
pub async fn setup_test_app(db: DatabaseConnection) -> Router {
    let state = setup_search_state(db).await;
    Router::new().nest("/api/v1", academy_models::router(state))
}

/// `GET` the path and return the status with the decoded JSON body.
#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[allow(dead_code)]
pub fn encode(value: &str) -> String {
    url_escape::encode_component(value).to_string()
}

#[allow(dead_code)]
pub fn timestamp(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Hex-only identifiers so generated emails never match a name search.
fn short_id(id: Uuid, len: usize) -> String {
    id.simple().to_string()[..len].to_string()
}

#[allow(dead_code)]
pub async fn insert_student(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    enrolled: bool,
    enrolled_at: NaiveDateTime,
) -> StudentModel {
    let id = Uuid::new_v4();
    StudentActiveModel {
        id: Set(id),
        first_name: Set(first_name.to_owned()),
        last_name: Set(last_name.to_owned()),
        dni: Set(short_id(id, 9).to_uppercase()),
        email: Set(format!("{}@academy.test", short_id(id, 12))),
        enrolled: Set(enrolled),
        enrolled_at: Set(enrolled_at),
    }
    .insert(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn insert_professor(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    username: &str,
) -> ProfessorModel {
    let id = Uuid::new_v4();
    ProfessorActiveModel {
        id: Set(id),
        first_name: Set(first_name.to_owned()),
        last_name: Set(last_name.to_owned()),
        username: Set(username.to_owned()),
        email: Set(format!("{}@academy.test", short_id(id, 12))),
        dni: Set(short_id(id, 9).to_uppercase()),
        enabled: Set(true),
    }
    .insert(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn insert_class(
    db: &DatabaseConnection,
    title: &str,
    price: Decimal,
    format: Format,
    difficulty: Difficulty,
) -> ClassModel {
    ClassActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_owned()),
        description: Set(None),
        price: Set(price),
        format: Set(format),
        difficulty: Set(difficulty),
    }
    .insert(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn insert_material(db: &DatabaseConnection, name: &str, url: &str) -> MaterialModel {
    MaterialActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
        url: Set(url.to_owned()),
    }
    .insert(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn insert_exercise(
    db: &DatabaseConnection,
    class_id: Uuid,
    name: &str,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
) -> ExerciseModel {
    ExerciseActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
        statement: Set(format!("Statement for {name}")),
        class_id: Set(class_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
    }
    .insert(db)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn assign_professor(db: &DatabaseConnection, class_id: Uuid, professor_id: Uuid) {
    let link = ClassProfessorActiveModel {
        class_id: Set(class_id),
        professor_id: Set(professor_id),
    };
    ClassProfessorEntity::insert(link)
        .exec_without_returning(db)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Migrations
// ---------------------------------------------------------------------------

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(CreateStudentTable),
            Box::new(CreateProfessorTable),
            Box::new(CreateClassTable),
            Box::new(CreateMaterialTable),
            Box::new(CreateExerciseTable),
            Box::new(CreateClassProfessorTable),
        ]
    }
}

pub struct CreateStudentTable;

impl MigrationName for CreateStudentTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_student_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateStudentTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(StudentEntity)
            .if_not_exists()
            .col(ColumnDef::new(StudentColumn::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(StudentColumn::FirstName).string().not_null())
            .col(ColumnDef::new(StudentColumn::LastName).string().not_null())
            .col(ColumnDef::new(StudentColumn::Dni).string().not_null())
            .col(ColumnDef::new(StudentColumn::Email).string().not_null())
            .col(
                ColumnDef::new(StudentColumn::Enrolled)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(StudentColumn::EnrolledAt).date_time().not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentEntity).to_owned())
            .await
    }
}

pub struct CreateProfessorTable;

impl MigrationName for CreateProfessorTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_professor_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateProfessorTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ProfessorEntity)
            .if_not_exists()
            .col(ColumnDef::new(ProfessorColumn::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(ProfessorColumn::FirstName).string().not_null())
            .col(ColumnDef::new(ProfessorColumn::LastName).string().not_null())
            .col(
                ColumnDef::new(ProfessorColumn::Username)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(ProfessorColumn::Email).string().not_null())
            .col(ColumnDef::new(ProfessorColumn::Dni).string().not_null())
            .col(
                ColumnDef::new(ProfessorColumn::Enabled)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfessorEntity).to_owned())
            .await
    }
}

pub struct CreateClassTable;

impl MigrationName for CreateClassTable {
    fn name(&self) -> &'static str {
        "m20240101_000003_create_class_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateClassTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ClassEntity)
            .if_not_exists()
            .col(ColumnDef::new(ClassColumn::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(ClassColumn::Title).string().not_null())
            .col(ColumnDef::new(ClassColumn::Description).text().null())
            .col(ColumnDef::new(ClassColumn::Price).decimal_len(10, 2).not_null())
            .col(ColumnDef::new(ClassColumn::Format).string_len(16).not_null())
            .col(ColumnDef::new(ClassColumn::Difficulty).string_len(16).not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassEntity).to_owned())
            .await
    }
}

pub struct CreateMaterialTable;

impl MigrationName for CreateMaterialTable {
    fn name(&self) -> &'static str {
        "m20240101_000004_create_material_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateMaterialTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(MaterialEntity)
            .if_not_exists()
            .col(ColumnDef::new(MaterialColumn::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(MaterialColumn::Name).string().not_null())
            .col(ColumnDef::new(MaterialColumn::Url).string().not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaterialEntity).to_owned())
            .await
    }
}

pub struct CreateExerciseTable;

impl MigrationName for CreateExerciseTable {
    fn name(&self) -> &'static str {
        "m20240101_000005_create_exercise_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateExerciseTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ExerciseEntity)
            .if_not_exists()
            .col(ColumnDef::new(ExerciseColumn::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(ExerciseColumn::Name).string().not_null())
            .col(ColumnDef::new(ExerciseColumn::Statement).text().not_null())
            .col(ColumnDef::new(ExerciseColumn::ClassId).uuid().not_null())
            .col(ColumnDef::new(ExerciseColumn::StartDate).date_time().not_null())
            .col(ColumnDef::new(ExerciseColumn::EndDate).date_time().not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExerciseEntity).to_owned())
            .await
    }
}

pub struct CreateClassProfessorTable;

impl MigrationName for CreateClassProfessorTable {
    fn name(&self) -> &'static str {
        "m20240101_000006_create_class_professor_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateClassProfessorTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ClassProfessorEntity)
            .if_not_exists()
            .col(ColumnDef::new(ClassProfessorColumn::ClassId).uuid().not_null())
            .col(ColumnDef::new(ClassProfessorColumn::ProfessorId).uuid().not_null())
            .primary_key(
                Index::create()
                    .col(ClassProfessorColumn::ClassId)
                    .col(ClassProfessorColumn::ProfessorId),
            )
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassProfessorEntity).to_owned())
            .await
    }
}
