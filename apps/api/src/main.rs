//! Portaria API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod pages;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use portaria_application::{AccessService, AuthService, EventService, ReportService};
use portaria_core::AppError;
use portaria_domain::AdmissionPolicy;
use portaria_infrastructure::{
    Argon2PasswordHasher, PostgresAccessLogRepository, PostgresAdminRepository,
    PostgresEventRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use crate::api_config::{ApiConfig, RunMode, init_tracing};
use crate::state::AppState;

/// Seeded administrator login name.
const ADMIN_USERNAME: &str = "admin";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    let admin_repository = Arc::new(PostgresAdminRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let auth_service = AuthService::new(admin_repository, password_hasher);

    match &config.run_mode {
        RunMode::MigrateOnly => {
            info!("database migrations applied successfully");
            return Ok(());
        }
        RunMode::SeedAdmin { password } => {
            auth_service.seed_admin(ADMIN_USERNAME, password).await?;
            info!(username = ADMIN_USERNAME, "administrator account created or reset");
            return Ok(());
        }
        RunMode::Serve => {}
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    // Sessions expire after an hour of inactivity.
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(60)));

    let access_log_repository = Arc::new(PostgresAccessLogRepository::new(pool.clone()));
    let event_repository = Arc::new(PostgresEventRepository::new(pool.clone()));

    let app_state = AppState {
        access_service: AccessService::new(
            access_log_repository.clone(),
            AdmissionPolicy::default(),
        ),
        report_service: ReportService::new(access_log_repository),
        event_service: EventService::new(event_repository),
        auth_service,
    };

    let admin_routes = Router::new()
        .route("/relatorio", get(handlers::report::report_handler))
        .route("/exportar_csv", get(handlers::report::export_csv_handler))
        .route(
            "/limpar_registros",
            post(handlers::report::clear_records_handler),
        )
        .route("/controle", get(handlers::events::controle_handler))
        .route(
            "/evento/criar",
            get(handlers::events::create_event_page_handler)
                .post(handlers::events::create_event_handler),
        )
        .route(
            "/evento/{event_id}/apagar",
            post(handlers::events::delete_event_handler),
        )
        .route(
            "/evento/{event_id}",
            get(handlers::events::event_report_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_admin,
        ));

    let app = Router::new()
        .route(
            "/",
            get(handlers::access::index_handler).post(handlers::access::submit_access_handler),
        )
        .route(
            "/login",
            get(handlers::auth::login_page_handler).post(handlers::auth::login_handler),
        )
        .route("/logout", get(handlers::auth::logout_handler))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "portaria-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
