//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_access_log_repository;
mod postgres_admin_repository;
mod postgres_event_repository;
mod schema_probe;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_access_log_repository::PostgresAccessLogRepository;
pub use postgres_admin_repository::PostgresAdminRepository;
pub use postgres_event_repository::PostgresEventRepository;
pub use schema_probe::{SchemaProbe, discover_access_log_columns, resolve_access_log_columns};
