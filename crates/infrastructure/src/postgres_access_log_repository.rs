//! PostgreSQL-backed, schema-tolerant access log.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use portaria_application::{AccessListing, AccessLogRepository, AccessRecord};
use portaria_core::{AppError, AppResult};
use portaria_domain::{AccessAttempt, ColumnMap, EventId, LogicalField};

use crate::schema_probe::resolve_access_log_columns;

/// Timestamp format used for the stored `data` column.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How one attempt gets written. Decided once, before touching the table.
#[derive(Debug, PartialEq, Eq)]
enum InsertPlan {
    /// Dynamic statement over the columns resolution produced.
    Resolved {
        columns: Vec<String>,
        values: Vec<String>,
    },
    /// Canonical six-column statement, used when resolution produced
    /// nothing this attempt can be written through.
    FixedSchema,
}

impl InsertPlan {
    fn for_attempt(attempt: &AccessAttempt, map: &ColumnMap) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        for field in LogicalField::ALL {
            let Some(column) = map.get(field) else {
                continue;
            };
            let value = match field {
                LogicalField::Name => attempt.name.clone(),
                LogicalField::Cpf => attempt.cpf_digits.clone(),
                LogicalField::Timestamp => {
                    attempt.decided_at.format(TIMESTAMP_FORMAT).to_string()
                }
                LogicalField::Status => attempt.status.as_str().to_owned(),
                // Reason is only written when the attempt was denied.
                LogicalField::Reason => match &attempt.reason {
                    Some(reason) => reason.clone(),
                    None => continue,
                },
            };
            columns.push(column.to_owned());
            values.push(value);
        }

        if columns.is_empty() {
            Self::FixedSchema
        } else {
            Self::Resolved { columns, values }
        }
    }
}

/// PostgreSQL implementation of the access-log repository port.
///
/// Inserts and report queries are built from the column map resolved
/// against the live table, so the same binary works against deployments
/// with drifted column names. The map is resolved per call, not cached;
/// the table may be altered underneath a running instance.
#[derive(Clone)]
pub struct PostgresAccessLogRepository {
    pool: PgPool,
}

impl PostgresAccessLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_resolved(&self, columns: &[String], values: &[String]) -> AppResult<()> {
        let placeholders: Vec<String> = (1..=values.len()).map(|n| format!("${n}")).collect();
        // Column names come from catalog introspection (filtered to plain
        // identifiers), never from request input.
        let sql = format!(
            "INSERT INTO acessos ({}) VALUES ({})",
            columns.join(","),
            placeholders.join(",")
        );

        let mut query = sqlx::query(&sql);
        for value in values {
            query = query.bind(value);
        }
        query
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to insert access attempt: {error}"))
            })?;

        Ok(())
    }

    /// Fixed-schema insert used when column resolution found nothing.
    async fn insert_fixed(&self, attempt: &AccessAttempt) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO acessos (nome, ingresso, cpf, data, status, motivo)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&attempt.name)
        .bind(&attempt.ticket_code)
        .bind(&attempt.cpf_digits)
        .bind(attempt.decided_at.format(TIMESTAMP_FORMAT).to_string())
        .bind(attempt.status.as_str())
        .bind(attempt.reason.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to insert access attempt (fixed schema): {error}"
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl AccessLogRepository for PostgresAccessLogRepository {
    async fn record(&self, attempt: &AccessAttempt) -> AppResult<()> {
        let map = resolve_access_log_columns(&self.pool).await;

        match InsertPlan::for_attempt(attempt, &map) {
            InsertPlan::Resolved { columns, values } => {
                self.insert_resolved(&columns, &values).await
            }
            InsertPlan::FixedSchema => self.insert_fixed(attempt).await,
        }
    }

    async fn list(&self, status_filter: Option<&str>) -> AppResult<AccessListing> {
        let columns = resolve_access_log_columns(&self.pool).await;

        let name_col = columns.physical_or_canonical(LogicalField::Name);
        let cpf_col = columns.physical_or_canonical(LogicalField::Cpf);
        let data_col = columns.physical_or_canonical(LogicalField::Timestamp);
        let status_col = columns.physical_or_canonical(LogicalField::Status);
        let reason_col = columns.get(LogicalField::Reason);

        let mut projection = format!(
            "{name_col} AS nome, {cpf_col} AS cpf, {data_col}::text AS data, {status_col} AS status"
        );
        if let Some(reason_col) = reason_col {
            projection.push_str(&format!(", {reason_col} AS motivo"));
        }

        let mut sql = format!("SELECT {projection} FROM acessos WHERE 1=1");
        if status_filter.is_some() {
            sql.push_str(&format!(" AND {status_col} = $1"));
        }
        // Only resolved columns may appear in the query; a drifted table is
        // not guaranteed to have an `id`. Unordered when no timestamp
        // column resolved.
        if let Some(order_col) = columns.get(LogicalField::Timestamp) {
            sql.push_str(&format!(" ORDER BY {order_col}"));
        }

        let mut query = sqlx::query(&sql);
        if let Some(status) = status_filter {
            query = query.bind(status);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|error| {
            AppError::Internal(format!("failed to list access attempts: {error}"))
        })?;

        let includes_reason = reason_col.is_some();
        let records = rows
            .iter()
            .map(|row| decode_record(row, includes_reason))
            .collect();

        Ok(AccessListing {
            records,
            includes_reason,
        })
    }

    async fn list_for_event(&self, event_id: EventId) -> AppResult<Vec<AccessRecord>> {
        // Per-event reports assume the canonical column names.
        let rows = sqlx::query(
            r#"
            SELECT nome, cpf, data, status
            FROM acessos
            WHERE evento_id = $1
            ORDER BY id
            "#,
        )
        .bind(event_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list attempts for event: {error}"))
        })?;

        Ok(rows.iter().map(|row| decode_record(row, false)).collect())
    }

    async fn clear_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM acessos")
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear access attempts: {error}"))
            })?;

        Ok(())
    }
}

/// Decodes one projected row into canonical fields.
///
/// Columns are aliased back to canonical names, but a drifted deployment
/// can still hand back unexpected shapes; lookup falls back from the alias
/// to the positional ordinal, and a field that decodes under neither is an
/// empty string rather than an error.
fn decode_record(row: &PgRow, includes_reason: bool) -> AccessRecord {
    AccessRecord {
        name: text_field(row, "nome", 0),
        cpf: text_field(row, "cpf", 1),
        timestamp: text_field(row, "data", 2),
        status: text_field(row, "status", 3),
        reason: includes_reason.then(|| text_field(row, "motivo", 4)).filter(|r| !r.is_empty()),
    }
}

fn text_field(row: &PgRow, name: &str, ordinal: usize) -> String {
    row.try_get::<Option<String>, _>(name)
        .or_else(|_| row.try_get::<Option<String>, _>(ordinal))
        .ok()
        .flatten()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
