//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod cpf;
mod event;
mod schema;

pub use access::{
    AccessAttempt, AccessDecision, AccessStatus, AdmissionPolicy, DENIAL_REASON,
};
pub use cpf::{strip_non_digits, validate_cpf};
pub use event::{Event, EventId, NewEvent};
pub use schema::{ColumnMap, LogicalField};
