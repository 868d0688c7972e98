// Storage-side normalization must fold text exactly like the in-process normalizer.

use academy_models::StudentModel;
use academy_search::normalization::{VERIFICATION_SAMPLES, normalize_str, storage_normalize};
use academy_search::{
    FilterSpec, FilterValue, NormalizationMode, NormalizationProvider, SearchConfig, SearchResource,
};
use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

mod common;
use common::{setup_test_db, timestamp};

fn exec_ok() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 0,
    }
}

fn folded_row(text: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("normalized", Value::from(text.to_string()))])
}

/// One correct storage answer per verification sample.
fn agreeing_rows() -> Vec<Vec<BTreeMap<&'static str, Value>>> {
    VERIFICATION_SAMPLES
        .iter()
        .map(|sample| vec![folded_row(&normalize_str(sample))])
        .collect()
}

const SAMPLES: &[&str] = &[
    "José",
    "GARCÍA",
    "  Iñaki Núñez  ",
    "François Ça",
    "ÀÈÌÒÙ àèìòù",
    "Pingüino",
    "plain",
    "",
];

#[tokio::test]
async fn test_provider_never_fails_and_picks_a_working_mode() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let normalization = NormalizationProvider::initialize(&db).await;

    if db.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
        // No normalize_text function is registered, so SQLite lands on the inline table
        assert_eq!(normalization.mode(), NormalizationMode::Fallback);
    }
    assert!(normalization.is_accent_insensitive());
}

#[tokio::test]
async fn test_storage_fold_agrees_with_normalizer() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let normalization = NormalizationProvider::initialize(&db).await;

    for sample in SAMPLES {
        let stored = storage_normalize(&db, &normalization, sample)
            .await
            .expect("storage normalization failed");
        assert_eq!(
            stored.as_deref(),
            Some(normalize_str(sample).as_str()),
            "storage and normalizer disagree on {sample:?}"
        );
    }
}

#[tokio::test]
async fn test_repeated_initialization_is_stable() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let first = NormalizationProvider::initialize(&db).await;
    let second = NormalizationProvider::initialize(&db).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_provisioning_degrades_to_case_only_matching() {
    let student = StudentModel {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "García".to_string(),
        dni: "12345678Z".to_string(),
        email: "ana@academy.test".to_string(),
        enrolled: true,
        enrolled_at: timestamp(2024, 9, 1),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([
            DbErr::Custom("permission denied to create extension \"unaccent\"".to_string()),
            DbErr::Custom("permission denied for schema public".to_string()),
        ])
        .append_query_results([vec![BTreeMap::from([("num_items", Value::BigInt(Some(1)))])]])
        .append_query_results([vec![student.clone()]])
        .into_connection();

    let normalization = NormalizationProvider::initialize(&db).await;
    assert_eq!(normalization.mode(), NormalizationMode::Unavailable);
    assert!(!normalization.is_accent_insensitive());

    let spec = FilterSpec::new()
        .with_general_term("García")
        .with_filter("last_name", FilterValue::Text("GARCÍA".into()));
    let page = StudentModel::search(&db, &normalization, &SearchConfig::default(), &spec)
        .await
        .expect("search must still run without storage normalization");
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content, vec![student]);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 4, "{log:?}");
    let provisioning = format!("{:?}", &log[..2]);
    assert!(provisioning.contains("unaccent"), "{provisioning}");
    let searches = format!("{:?}", &log[2..]);
    assert!(searches.contains("LOWER("), "{searches}");
    assert!(!searches.contains("normalize_text"), "{searches}");
    assert!(searches.contains("%garcía%"), "{searches}");
}

#[tokio::test]
async fn test_failed_verification_queries_degrade_without_failing() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_errors([
            DbErr::Custom("no such function: normalize_text".to_string()),
            DbErr::Custom("database is locked".to_string()),
        ])
        .into_connection();

    let normalization = NormalizationProvider::initialize(&db).await;
    assert_eq!(normalization.mode(), NormalizationMode::Unavailable);
    assert_eq!(normalization.backend(), DatabaseBackend::Sqlite);
}

#[tokio::test]
async fn test_native_failure_installs_fallback() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Custom("extension \"unaccent\" is not available".to_string())])
        .append_exec_results([exec_ok()])
        .append_query_results(agreeing_rows())
        .into_connection();

    let normalization = NormalizationProvider::initialize(&db).await;
    assert_eq!(normalization.mode(), NormalizationMode::Fallback);

    let log = db.into_transaction_log();
    let installed = format!("{:?}", log[1]);
    assert!(installed.contains("CREATE OR REPLACE FUNCTION normalize_text"), "{installed}");
    assert!(installed.contains("REPLACE(input_text"), "{installed}");
}

#[tokio::test]
async fn test_tier_that_disagrees_with_normalizer_is_rejected() {
    // Every tier installs, but storage keeps the accents
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
        .append_query_results([vec![folded_row("josé")], vec![folded_row("josé")]])
        .into_connection();

    let normalization = NormalizationProvider::initialize(&db).await;
    assert_eq!(normalization.mode(), NormalizationMode::Unavailable);
}
