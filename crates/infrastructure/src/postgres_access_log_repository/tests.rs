use chrono::Utc;
use portaria_application::AccessLogRepository;
use portaria_domain::{AccessAttempt, AccessStatus, ColumnMap, LogicalField};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::{InsertPlan, PostgresAccessLogRepository};
use crate::schema_probe::{discover_access_log_columns, resolve_access_log_columns};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for access log tests: {error}");
    }

    Some(pool)
}

fn attempt(name: &str, status: AccessStatus, reason: Option<&str>) -> AccessAttempt {
    AccessAttempt {
        name: name.to_owned(),
        ticket_code: "ING123".to_owned(),
        cpf_digits: "52998224725".to_owned(),
        decided_at: Utc::now(),
        status,
        reason: reason.map(str::to_owned),
    }
}

#[tokio::test]
async fn discovery_sees_canonical_columns() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let discovered = discover_access_log_columns(&pool).await;
    assert!(discovered.iter().any(|c| c == "nome"));
    assert!(discovered.iter().any(|c| c == "cpf"));

    let map = resolve_access_log_columns(&pool).await;
    assert_eq!(map.get(LogicalField::Name), Some("nome"));
    assert_eq!(map.get(LogicalField::Reason), Some("motivo"));
}

#[tokio::test]
async fn resolution_is_idempotent_against_live_schema() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let first = resolve_access_log_columns(&pool).await;
    let second = resolve_access_log_columns(&pool).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn record_then_list_round_trips() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAccessLogRepository::new(pool.clone());
    if let Err(error) = repository.clear_all().await {
        panic!("failed to clear table before test: {error}");
    }

    let recorded = repository
        .record(&attempt(
            "Visitante Teste",
            AccessStatus::Denied,
            Some("Regras de acesso não atendidas"),
        ))
        .await;
    assert!(recorded.is_ok());

    let listing = match repository.list(None).await {
        Ok(listing) => listing,
        Err(error) => panic!("failed to list attempts: {error}"),
    };
    assert!(listing.includes_reason);
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].name, "Visitante Teste");
    assert_eq!(listing.records[0].status, "Negado");
    assert_eq!(
        listing.records[0].reason.as_deref(),
        Some("Regras de acesso não atendidas")
    );

    let filtered = match repository.list(Some("Liberado")).await {
        Ok(listing) => listing,
        Err(error) => panic!("failed to list filtered attempts: {error}"),
    };
    assert!(filtered.records.is_empty());
}

#[tokio::test]
async fn listing_survives_a_drifted_table_without_id() {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return;
    };
    let Some(pool) = test_pool().await else {
        return;
    };

    // Dedicated schema so the canonical table keeps serving other tests.
    // No `id` column on purpose; every name is a drifted spelling.
    for statement in [
        "DROP SCHEMA IF EXISTS acessos_drift CASCADE",
        "CREATE SCHEMA acessos_drift",
        "CREATE TABLE acessos_drift.acessos (
            nome_acesso TEXT,
            cpf_acesso TEXT,
            datahora TEXT,
            status_acesso TEXT
        )",
    ] {
        if let Err(error) = sqlx::query(statement).execute(&pool).await {
            panic!("failed to set up drifted schema: {error}");
        }
    }

    let drift_pool = match PgPoolOptions::new()
        .max_connections(1)
        .after_connect(|connection, _metadata| {
            Box::pin(async move {
                sqlx::Executor::execute(connection, "SET search_path TO acessos_drift").await?;
                Ok(())
            })
        })
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to drifted schema: {error}"),
    };

    let map = resolve_access_log_columns(&drift_pool).await;
    assert_eq!(map.get(LogicalField::Name), Some("nome_acesso"));
    assert_eq!(map.get(LogicalField::Timestamp), Some("datahora"));
    assert_eq!(map.get(LogicalField::Reason), None);

    let repository = PostgresAccessLogRepository::new(drift_pool);
    if let Err(error) = repository
        .record(&attempt("Visitante Drift", AccessStatus::Admitted, None))
        .await
    {
        panic!("failed to record against drifted table: {error}");
    }

    let listing = match repository.list(None).await {
        Ok(listing) => listing,
        Err(error) => panic!("failed to list from drifted table: {error}"),
    };
    assert!(!listing.includes_reason);
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].name, "Visitante Drift");
    assert_eq!(listing.records[0].status, "Liberado");
}

#[test]
fn empty_column_map_falls_back_to_fixed_schema() {
    let plan = InsertPlan::for_attempt(
        &attempt("Qualquer", AccessStatus::Admitted, None),
        &ColumnMap::resolve(&[]),
    );

    assert_eq!(plan, InsertPlan::FixedSchema);
}

#[test]
fn resolved_plan_writes_reason_only_when_denied() {
    let map = ColumnMap::resolve(&[
        "nome".to_owned(),
        "cpf".to_owned(),
        "data".to_owned(),
        "status".to_owned(),
        "motivo".to_owned(),
    ]);

    let denied = InsertPlan::for_attempt(
        &attempt(
            "Qualquer",
            AccessStatus::Denied,
            Some("Regras de acesso não atendidas"),
        ),
        &map,
    );
    let InsertPlan::Resolved { columns, values } = denied else {
        panic!("expected a resolved plan");
    };
    assert_eq!(columns, ["nome", "cpf", "data", "status", "motivo"]);
    assert_eq!(values.len(), columns.len());

    let admitted =
        InsertPlan::for_attempt(&attempt("Qualquer", AccessStatus::Admitted, None), &map);
    let InsertPlan::Resolved { columns, .. } = admitted else {
        panic!("expected a resolved plan");
    };
    assert!(!columns.iter().any(|c| c == "motivo"));
}
