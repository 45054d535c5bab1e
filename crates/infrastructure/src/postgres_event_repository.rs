//! PostgreSQL-backed event repository.

use async_trait::async_trait;
use sqlx::PgPool;

use portaria_application::EventRepository;
use portaria_core::{AppError, AppResult};
use portaria_domain::{Event, EventId, NewEvent};

/// PostgreSQL implementation of the event repository port.
#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    nome: String,
    data_inicio: chrono::DateTime<chrono::Utc>,
    data_fim: chrono::DateTime<chrono::Utc>,
    local: Option<String>,
    descricao: Option<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::new(row.id),
            name: row.nome,
            starts_at: row.data_inicio,
            ends_at: row.data_fim,
            location: row.local,
            description: row.descricao,
        }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: &NewEvent) -> AppResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO eventos (nome, data_inicio, data_fim, local, descricao)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, data_inicio, data_fim, local, descricao
            "#,
        )
        .bind(event.name.as_str())
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.location.as_deref())
        .bind(event.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create event: {error}")))?;

        Ok(Event::from(row))
    }

    async fn list(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, nome, data_inicio, data_fim, local, descricao
            FROM eventos
            ORDER BY data_inicio ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list events: {error}")))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, nome, data_inicio, data_fim, local, descricao
            FROM eventos
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(event_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find event by id: {error}")))?;

        Ok(row.map(Event::from))
    }

    async fn delete(&self, event_id: EventId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM eventos WHERE id = $1")
            .bind(event_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete event: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
