//! Access submission port and application service.
//!
//! Owns the submission flow: decide admission against the static policy,
//! then persist the attempt best-effort. Persistence failure never changes
//! the decision already rendered to the visitor.

use std::sync::Arc;

use async_trait::async_trait;

use portaria_core::AppResult;
use portaria_domain::{AccessAttempt, AccessDecision, AdmissionPolicy, EventId};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// One access-log row as projected back to canonical field names.
///
/// Values are plain strings: the physical schema varies per deployment and
/// the timestamp column is not guaranteed to be a timestamp type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    /// Visitor name.
    pub name: String,
    /// CPF digits.
    pub cpf: String,
    /// Decision timestamp, as stored.
    pub timestamp: String,
    /// "Liberado" or "Negado".
    pub status: String,
    /// Denial reason, when the deployment has a reason column.
    pub reason: Option<String>,
}

/// Result set of an access-log query.
#[derive(Debug, Clone, Default)]
pub struct AccessListing {
    /// Matching rows, in timestamp order when the deployment resolved a
    /// timestamp column.
    pub records: Vec<AccessRecord>,
    /// Whether the backing table resolved a reason column; drives the
    /// optional "Motivo" column in reports and exports, even when the
    /// result set is empty.
    pub includes_reason: bool,
}

/// Repository port for the schema-tolerant access log.
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Persists one decided attempt.
    async fn record(&self, attempt: &AccessAttempt) -> AppResult<()>;

    /// Lists attempts, optionally restricted to one status value.
    async fn list(&self, status_filter: Option<&str>) -> AppResult<AccessListing>;

    /// Lists attempts recorded against one event. Fixed canonical columns;
    /// does not go through column resolution.
    async fn list_for_event(&self, event_id: EventId) -> AppResult<Vec<AccessRecord>>;

    /// Deletes every attempt.
    async fn clear_all(&self) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Parameters of one form submission.
#[derive(Debug, Clone)]
pub struct SubmitAccessParams {
    /// Submitted name.
    pub name: String,
    /// Submitted ticket code.
    pub ticket_code: String,
    /// Submitted CPF, possibly punctuated.
    pub cpf: String,
}

/// Decides and records entry attempts.
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn AccessLogRepository>,
    policy: Arc<AdmissionPolicy>,
}

impl AccessService {
    /// Creates the service over a repository and a fixed admission policy.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessLogRepository>, policy: AdmissionPolicy) -> Self {
        Self {
            repository,
            policy: Arc::new(policy),
        }
    }

    /// Decides admission and records the attempt.
    ///
    /// Recording is fire-and-forget: a failed write is logged and the
    /// already-computed decision is still returned. The visitor-facing
    /// outcome is never transactionally tied to durability.
    pub async fn submit(&self, params: SubmitAccessParams) -> AppResult<AccessDecision> {
        let (attempt, decision) = self.policy.attempt(
            &params.name,
            &params.ticket_code,
            &params.cpf,
            chrono::Utc::now(),
        );

        if let Err(error) = self.repository.record(&attempt).await {
            tracing::warn!(%error, name = %attempt.name, "failed to persist access attempt");
        }

        Ok(decision)
    }
}
