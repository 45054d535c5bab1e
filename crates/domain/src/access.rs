//! Admission policy and recorded access attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cpf::{strip_non_digits, validate_cpf};

/// Fixed reason attached to every denied attempt.
pub const DENIAL_REASON: &str = "Regras de acesso não atendidas";

/// Outcome of one admission decision.
///
/// The wire and storage representation uses the Portuguese strings
/// "Liberado"/"Negado"; existing report consumers filter on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessStatus {
    /// Entry granted.
    Admitted,
    /// Entry refused.
    Denied,
}

impl AccessStatus {
    /// Returns the storage representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admitted => "Liberado",
            Self::Denied => "Negado",
        }
    }
}

/// Decision produced by [`AdmissionPolicy::decide`], including the result
/// of each individual rule for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Admit or deny.
    pub status: AccessStatus,
    /// Fixed denial reason; `None` when admitted.
    pub reason: Option<String>,
    /// Submitted name was on the VIP allow-list.
    pub vip_match: bool,
    /// Submitted ticket code was in the valid-ticket set.
    pub ticket_match: bool,
    /// Submitted CPF passed checksum validation.
    pub cpf_valid: bool,
}

impl AccessDecision {
    /// True when the decision admits the visitor.
    #[must_use]
    pub fn admitted(&self) -> bool {
        self.status == AccessStatus::Admitted
    }
}

/// One admission request together with its decided outcome, ready to be
/// persisted. Immutable once created; the status is fully determined by
/// the policy at decision time and never edited afterward.
#[derive(Debug, Clone)]
pub struct AccessAttempt {
    /// Name as submitted.
    pub name: String,
    /// Ticket code as submitted.
    pub ticket_code: String,
    /// CPF reduced to its digits.
    pub cpf_digits: String,
    /// Decision time.
    pub decided_at: DateTime<Utc>,
    /// Decided status.
    pub status: AccessStatus,
    /// Denial reason, when denied.
    pub reason: Option<String>,
}

/// Static admission policy: a VIP allow-list, a valid-ticket set and the
/// CPF checksum rule.
///
/// Admission requires `(vip || ticket) && cpf`. The lists are deployment
/// policy, not data; they are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionPolicy {
    vip_allowlist: Vec<String>,
    valid_tickets: Vec<String>,
}

impl AdmissionPolicy {
    /// Creates a policy from explicit lists.
    #[must_use]
    pub fn new(vip_allowlist: Vec<String>, valid_tickets: Vec<String>) -> Self {
        Self {
            vip_allowlist,
            valid_tickets,
        }
    }

    /// Decides admission for a submitted name, ticket code and CPF.
    #[must_use]
    pub fn decide(&self, name: &str, ticket_code: &str, cpf: &str) -> AccessDecision {
        let vip_match = self.vip_allowlist.iter().any(|vip| vip == name);
        let ticket_match = self.valid_tickets.iter().any(|code| code == ticket_code);
        let cpf_valid = validate_cpf(cpf);

        if (vip_match || ticket_match) && cpf_valid {
            AccessDecision {
                status: AccessStatus::Admitted,
                reason: None,
                vip_match,
                ticket_match,
                cpf_valid,
            }
        } else {
            AccessDecision {
                status: AccessStatus::Denied,
                reason: Some(DENIAL_REASON.to_owned()),
                vip_match,
                ticket_match,
                cpf_valid,
            }
        }
    }

    /// Builds the persistable attempt for a submission decided at `now`.
    #[must_use]
    pub fn attempt(
        &self,
        name: &str,
        ticket_code: &str,
        cpf: &str,
        now: DateTime<Utc>,
    ) -> (AccessAttempt, AccessDecision) {
        let decision = self.decide(name, ticket_code, cpf);
        let attempt = AccessAttempt {
            name: name.to_owned(),
            ticket_code: ticket_code.to_owned(),
            cpf_digits: strip_non_digits(cpf),
            decided_at: now,
            status: decision.status,
            reason: decision.reason.clone(),
        };
        (attempt, decision)
    }
}

impl Default for AdmissionPolicy {
    /// The deployed policy lists.
    fn default() -> Self {
        Self::new(
            [
                "Jair Messias Bolsonaro",
                "Luiz Inácio Lula Da Silva",
                "Lula",
                "Carlos Bolsonaro",
                "Emmanuel Macron",
                "Bolsonaro",
            ]
            .map(str::to_owned)
            .to_vec(),
            ["ING123", "ING456", "ING789"].map(str::to_owned).to_vec(),
        )
    }
}
