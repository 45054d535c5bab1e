//! Runtime discovery of the access-log table's physical columns.
//!
//! Deployments disagree on the `acessos` column names, so queries are built
//! from a [`ColumnMap`] resolved against the live schema. Discovery tries a
//! fixed sequence of strategies; every failure degrades to the next one and
//! ultimately to an empty column list. Introspection problems are never
//! surfaced to callers.

use sqlx::{Column, Executor, PgPool};

use portaria_domain::ColumnMap;

/// One introspection strategy. Tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaProbe {
    /// Standard metadata query against `information_schema.columns`.
    InformationSchema,
    /// Catalog lookup via `pg_attribute`, the describe-command analogue.
    PgCatalog,
    /// Prepare a bounded `SELECT *` and read the column labels off the
    /// statement description. Works even when the table is empty.
    ProbeSelect,
}

impl SchemaProbe {
    /// Strategy order: exact metadata first, catalog second, probe last.
    pub const ORDER: [Self; 3] = [Self::InformationSchema, Self::PgCatalog, Self::ProbeSelect];

    async fn columns(self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        match self {
            Self::InformationSchema => {
                sqlx::query_scalar::<_, String>(
                    r#"
                    SELECT column_name::text
                    FROM information_schema.columns
                    WHERE table_schema = current_schema() AND table_name = 'acessos'
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            Self::PgCatalog => {
                sqlx::query_scalar::<_, String>(
                    r#"
                    SELECT a.attname::text
                    FROM pg_attribute a
                    JOIN pg_class c ON a.attrelid = c.oid
                    WHERE c.relname = 'acessos' AND a.attnum > 0 AND NOT a.attisdropped
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            Self::ProbeSelect => {
                let description = pool.describe("SELECT * FROM acessos LIMIT 1").await?;
                Ok(description
                    .columns()
                    .iter()
                    .map(|column| column.name().to_owned())
                    .collect())
            }
        }
    }
}

/// Discovers the column names of `acessos`, or an empty list when every
/// strategy fails.
///
/// Discovered names end up interpolated into SQL, so anything that is not a
/// plain lower-case identifier is dropped here.
pub async fn discover_access_log_columns(pool: &PgPool) -> Vec<String> {
    for probe in SchemaProbe::ORDER {
        match probe.columns(pool).await {
            Ok(columns) if !columns.is_empty() => {
                return columns
                    .into_iter()
                    .filter(|name| is_plain_identifier(name))
                    .collect();
            }
            Ok(_) => {
                tracing::debug!(?probe, "schema probe found no columns");
            }
            Err(error) => {
                tracing::debug!(?probe, %error, "schema probe failed");
            }
        }
    }

    Vec::new()
}

/// Resolves the logical-to-physical column map for the current deployment.
pub async fn resolve_access_log_columns(pool: &PgPool) -> ColumnMap {
    let discovered = discover_access_log_columns(pool).await;
    ColumnMap::resolve(&discovered)
}

// Lowercase only: `ColumnMap` lowercases before the name is interpolated
// unquoted, so a quoted mixed-case column would resolve but fail to query.
fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::is_plain_identifier;

    #[test]
    fn plain_identifiers_are_accepted() {
        assert!(is_plain_identifier("nome_acesso"));
        assert!(is_plain_identifier("created_at"));
    }

    #[test]
    fn quoted_or_hostile_names_are_dropped() {
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("nome; DROP TABLE acessos"));
        assert!(!is_plain_identifier("nome\"extra"));
    }

    #[test]
    fn quoted_mixed_case_names_are_dropped() {
        // An unquoted NOME folds to `nome` inside Postgres; anything that
        // still carries uppercase here was created quoted and cannot be
        // queried after lowercasing.
        assert!(!is_plain_identifier("Nome"));
        assert!(!is_plain_identifier("NOME"));
    }
}
