//! PostgreSQL-backed administrator account repository.

use async_trait::async_trait;
use sqlx::PgPool;

use portaria_application::{AdminRecord, AdminRepository};
use portaria_core::{AppError, AppResult};

/// PostgreSQL implementation of the admin account repository port.
#[derive(Clone)]
pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    password_hash: String,
    is_admin: Option<i32>,
}

impl From<AdminRow> for AdminRecord {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
        }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminRecord>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, username, password_hash, is_admin
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find account by username: {error}"))
        })?;

        Ok(row.map(AdminRecord::from))
    }

    async fn upsert(&self, username: &str, password_hash: &str, is_admin: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, is_admin)
            VALUES ($1, $2, $3)
            ON CONFLICT (username)
            DO UPDATE SET password_hash = EXCLUDED.password_hash,
                          is_admin = EXCLUDED.is_admin
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert account: {error}")))?;

        Ok(())
    }
}
