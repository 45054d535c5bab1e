//! Logical-to-physical column resolution for the access-log table.
//!
//! Deployments of the `acessos` table drifted: the same logical field shows
//! up as `nome`, `nome_acesso` or `name` depending on who provisioned the
//! database. Rather than demand a canonical schema, queries are built
//! against a [`ColumnMap`] resolved from whatever column names the live
//! table actually has. Resolution is pure; discovering the column names is
//! the infrastructure crate's job.

/// Logical fields of an access-log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    /// Visitor name.
    Name,
    /// CPF digits.
    Cpf,
    /// Decision timestamp.
    Timestamp,
    /// Admission status.
    Status,
    /// Denial reason.
    Reason,
}

impl LogicalField {
    /// All logical fields in canonical projection order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Cpf,
        Self::Timestamp,
        Self::Status,
        Self::Reason,
    ];

    /// Canonical column name, used as alias in projections and as the
    /// physical name when resolution found nothing better.
    #[must_use]
    pub fn canonical(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Cpf => "cpf",
            Self::Timestamp => "data",
            Self::Status => "status",
            Self::Reason => "motivo",
        }
    }

    /// Known physical spellings of this field, checked before the
    /// substring fallback. First discovered match wins.
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["nome", "nome_acesso", "name"],
            Self::Cpf => &["cpf", "cpf_acesso"],
            Self::Timestamp => &["data", "data_hora", "datahora", "created_at"],
            Self::Status => &["status", "status_acesso"],
            Self::Reason => &["motivo", "motivo_negado", "reason"],
        }
    }
}

/// Mapping from logical fields to the physical column names of one
/// deployment. Absent entries mean the field could not be resolved;
/// callers then use the canonical name verbatim (a convention, not a
/// guarantee that the column exists).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    name: Option<String>,
    cpf: Option<String>,
    timestamp: Option<String>,
    status: Option<String>,
    reason: Option<String>,
}

impl ColumnMap {
    /// Resolves the map from the column names discovered on the live table.
    ///
    /// Names are lower-cased, then matched per field against the synonym
    /// set; fields still unresolved fall back to the first column whose
    /// name contains the canonical token. Substring matching can mismap
    /// when an unrelated column shares the token; accepted tradeoff in the
    /// absence of a canonical schema.
    #[must_use]
    pub fn resolve(discovered: &[String]) -> Self {
        let normalized: Vec<String> = discovered.iter().map(|c| c.to_lowercase()).collect();

        let mut map = Self::default();
        for column in &normalized {
            for field in LogicalField::ALL {
                if map.get(field).is_none() && field.synonyms().contains(&column.as_str()) {
                    map.set(field, column.clone());
                }
            }
        }

        for field in LogicalField::ALL {
            if map.get(field).is_some() {
                continue;
            }
            if let Some(candidate) = normalized
                .iter()
                .find(|column| column.contains(field.canonical()))
            {
                map.set(field, candidate.clone());
            }
        }

        map
    }

    /// Returns the resolved physical column for a field, if any.
    #[must_use]
    pub fn get(&self, field: LogicalField) -> Option<&str> {
        match field {
            LogicalField::Name => self.name.as_deref(),
            LogicalField::Cpf => self.cpf.as_deref(),
            LogicalField::Timestamp => self.timestamp.as_deref(),
            LogicalField::Status => self.status.as_deref(),
            LogicalField::Reason => self.reason.as_deref(),
        }
    }

    /// Returns the physical column for a field, defaulting to the
    /// canonical name when unresolved.
    #[must_use]
    pub fn physical_or_canonical(&self, field: LogicalField) -> &str {
        self.get(field).unwrap_or_else(|| field.canonical())
    }

    /// True when no field resolved at all (empty or unrecognizable
    /// schema); inserts then take the fixed-schema path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        LogicalField::ALL.iter().all(|&f| self.get(f).is_none())
    }

    fn set(&mut self, field: LogicalField, column: String) {
        let slot = match field {
            LogicalField::Name => &mut self.name,
            LogicalField::Cpf => &mut self.cpf,
            LogicalField::Timestamp => &mut self.timestamp,
            LogicalField::Status => &mut self.status,
            LogicalField::Reason => &mut self.reason,
        };
        *slot = Some(column);
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnMap, LogicalField};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn canonical_schema_resolves_every_field() {
        let map = ColumnMap::resolve(&columns(&["id", "nome", "cpf", "data", "status", "motivo"]));
        assert_eq!(map.get(LogicalField::Name), Some("nome"));
        assert_eq!(map.get(LogicalField::Cpf), Some("cpf"));
        assert_eq!(map.get(LogicalField::Timestamp), Some("data"));
        assert_eq!(map.get(LogicalField::Status), Some("status"));
        assert_eq!(map.get(LogicalField::Reason), Some("motivo"));
    }

    #[test]
    fn synonym_match_wins_for_drifted_names() {
        let map = ColumnMap::resolve(&columns(&["nome_acesso", "cpf_acesso", "created_at"]));
        assert_eq!(map.get(LogicalField::Name), Some("nome_acesso"));
        assert_eq!(map.get(LogicalField::Cpf), Some("cpf_acesso"));
        assert_eq!(map.get(LogicalField::Timestamp), Some("created_at"));
        assert_eq!(map.get(LogicalField::Status), None);
    }

    #[test]
    fn first_synonym_match_is_kept() {
        let map = ColumnMap::resolve(&columns(&["nome", "nome_acesso"]));
        assert_eq!(map.get(LogicalField::Name), Some("nome"));
    }

    #[test]
    fn substring_fallback_applies_when_no_synonym_matches() {
        let map = ColumnMap::resolve(&columns(&["full_nome_x"]));
        assert_eq!(map.get(LogicalField::Name), Some("full_nome_x"));
    }

    #[test]
    fn upper_case_columns_are_normalized() {
        let map = ColumnMap::resolve(&columns(&["NOME", "Status_Acesso"]));
        assert_eq!(map.get(LogicalField::Name), Some("nome"));
        assert_eq!(map.get(LogicalField::Status), Some("status_acesso"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let discovered = columns(&["nome_acesso", "cpf", "data_hora", "status", "obs"]);
        assert_eq!(ColumnMap::resolve(&discovered), ColumnMap::resolve(&discovered));
    }

    #[test]
    fn empty_schema_yields_empty_map() {
        let map = ColumnMap::resolve(&[]);
        assert!(map.is_empty());
        assert_eq!(map.physical_or_canonical(LogicalField::Name), "nome");
    }
}
