//! Administrator authentication ports and application service.
//!
//! Login errors distinguish bad credentials (`Unauthorized`) from a valid
//! account without the admin flag (`Forbidden`); the HTTP layer maps those
//! to 401/403 for JSON callers and to inline form errors for browsers.

use std::sync::Arc;

use async_trait::async_trait;

use portaria_core::{AdminIdentity, AppError, AppResult};

/// User-visible message for failed credentials.
pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";

/// User-visible message for non-administrator accounts.
pub const ADMIN_ONLY: &str = "Acesso permitido apenas para administradores.";

/// One row of the `users` table.
#[derive(Debug, Clone)]
pub struct AdminRecord {
    /// Assigned identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// 1 for administrators; 0 or NULL otherwise.
    pub is_admin: Option<i32>,
}

impl AdminRecord {
    /// True when the account carries the administrator flag.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.is_admin == Some(1)
    }
}

/// Repository port for administrator accounts.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Finds an account by its unique username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminRecord>>;

    /// Creates or replaces an account with a fresh hash and the given
    /// admin flag. Used by the seeding CLI path.
    async fn upsert(&self, username: &str, password_hash: &str, is_admin: i32) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps the application crate free
/// of direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Authenticates administrators against the account store.
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    /// Creates the service over the account repository and hasher.
    #[must_use]
    pub fn new(repository: Arc<dyn AdminRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Authenticates a username/password pair.
    ///
    /// Returns `Unauthorized` for an unknown user or wrong password and
    /// `Forbidden` for a valid account that is not an administrator. The
    /// unknown-user path still runs one hash so response timing does not
    /// reveal whether the username exists.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AdminIdentity> {
        let Some(account) = self.repository.find_by_username(username).await? else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        if !self
            .password_hasher
            .verify_password(password, &account.password_hash)?
        {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        if !account.is_administrator() {
            return Err(AppError::Forbidden(ADMIN_ONLY.to_owned()));
        }

        Ok(AdminIdentity::new(account.username))
    }

    /// Re-checks that a session identity still maps to an administrator
    /// account. Called on every protected request.
    pub async fn verify_admin(&self, username: &str) -> AppResult<bool> {
        Ok(self
            .repository
            .find_by_username(username)
            .await?
            .is_some_and(|account| account.is_administrator()))
    }

    /// Creates or resets the `admin` account with the given password.
    pub async fn seed_admin(&self, username: &str, password: &str) -> AppResult<()> {
        let hash = self.password_hasher.hash_password(password)?;
        self.repository.upsert(username, &hash, 1).await
    }
}

#[cfg(test)]
mod tests;
