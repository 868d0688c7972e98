//! Academy search API over an in-memory database
//!
//! ```bash
//! cargo run -p academy_models --example academy_server
//! ```
//!
//! Then try:
//! - <http://localhost:3000/students?q=garcia>
//! - <http://localhost:3000/classes?difficulty=avanzado&price_max=60&sort_by=price>
//! - <http://localhost:3000/api-docs/openapi.json>

use academy_models::{
    ClassActiveModel, ClassEntity, Difficulty, ExerciseEntity, Format, MaterialEntity,
    ProfessorEntity, StudentActiveModel, StudentEntity,
};
use academy_search::{NormalizationProvider, SearchConfig, SearchState};
use axum::{Json, routing::get};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Schema, Set,
};
use std::env;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

async fn create_schema(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    for mut statement in [
        schema.create_table_from_entity(StudentEntity),
        schema.create_table_from_entity(ProfessorEntity),
        schema.create_table_from_entity(ClassEntity),
        schema.create_table_from_entity(MaterialEntity),
        schema.create_table_from_entity(ExerciseEntity),
    ] {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }
    Ok(())
}

async fn seed(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let enrolled_at = NaiveDate::from_ymd_opt(2024, 9, 2)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    for (first_name, last_name, dni) in [
        ("José", "García", "12345678A"),
        ("María", "Núñez", "23456789B"),
        ("Iñaki", "Garcia", "34567890C"),
        ("Ana", "López", "45678901D"),
    ] {
        StudentActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            dni: Set(dni.to_owned()),
            email: Set(format!("{}@academy.test", first_name.to_lowercase())),
            enrolled: Set(true),
            enrolled_at: Set(enrolled_at),
        }
        .insert(db)
        .await?;
    }

    for (title, price, format, difficulty) in [
        ("Introducción a Rust", 4900, Format::Online, Difficulty::Principiante),
        ("Programación concurrente", 7950, Format::Presencial, Difficulty::Avanzado),
        ("Bases de datos", 5500, Format::Online, Difficulty::Intermedio),
    ] {
        ClassActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_owned()),
            description: Set(None),
            price: Set(Decimal::new(price, 2)),
            format: Set(format),
            difficulty: Set(difficulty),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,academy_search=debug")),
        )
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db: DatabaseConnection = Database::connect(&database_url).await?;
    create_schema(&db).await?;
    seed(&db).await?;

    let normalization = NormalizationProvider::initialize(&db).await;
    let state = SearchState::new(db, normalization, SearchConfig::from_env());

    let apidocs = academy_models::openapi();
    let app = academy_models::router(state)
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let apidocs = apidocs.clone();
                async move { Json(apidocs) }
            }),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on http://0.0.0.0:3000");
    axum::serve(listener, app).await?;
    Ok(())
}
