use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portaria_core::{AppError, AppResult};

use super::{AdminRecord, AdminRepository, AuthService, PasswordHasher};

#[derive(Default)]
struct InMemoryAdminRepo {
    accounts: Mutex<Vec<AdminRecord>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepo {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminRecord>> {
        Ok(self
            .accounts
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?
            .iter()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn upsert(&self, username: &str, password_hash: &str, is_admin: i32) -> AppResult<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;
        accounts.retain(|account| account.username != username);
        let next_id = accounts.len() as i64 + 1;
        accounts.push(AdminRecord {
            id: next_id,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            is_admin: Some(is_admin),
        });
        Ok(())
    }
}

/// Reversible stand-in for Argon2: "hash" is the password prefixed.
struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

fn service_with_account(username: &str, password: &str, is_admin: Option<i32>) -> AuthService {
    let repo = InMemoryAdminRepo::default();
    if let Ok(mut accounts) = repo.accounts.lock() {
        accounts.push(AdminRecord {
            id: 1,
            username: username.to_owned(),
            password_hash: format!("hashed:{password}"),
            is_admin,
        });
    }
    AuthService::new(Arc::new(repo), Arc::new(FakeHasher))
}

#[tokio::test]
async fn login_succeeds_for_admin_with_correct_password() {
    let service = service_with_account("admin", "Senha123", Some(1));

    let identity = service.login("admin", "Senha123").await;
    assert!(identity.is_ok_and(|id| id.username() == "admin"));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let service = service_with_account("admin", "Senha123", Some(1));

    let result = service.login("admin", "errada").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn unknown_user_is_unauthorized() {
    let service = service_with_account("admin", "Senha123", Some(1));

    let result = service.login("ghost", "Senha123").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn non_admin_account_is_forbidden() {
    let service = service_with_account("porteiro", "Senha123", Some(0));

    let result = service.login("porteiro", "Senha123").await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn null_admin_flag_is_forbidden() {
    let service = service_with_account("porteiro", "Senha123", None);

    let result = service.login("porteiro", "Senha123").await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn verify_admin_reflects_current_account_state() {
    let service = service_with_account("admin", "Senha123", Some(1));

    assert!(service.verify_admin("admin").await.is_ok_and(|ok| ok));
    assert!(service.verify_admin("ghost").await.is_ok_and(|ok| !ok));
}

#[tokio::test]
async fn seed_admin_creates_a_working_account() {
    let service = AuthService::new(
        Arc::new(InMemoryAdminRepo::default()),
        Arc::new(FakeHasher),
    );

    assert!(service.seed_admin("admin", "NovaSenha").await.is_ok());
    let identity = service.login("admin", "NovaSenha").await;
    assert!(identity.is_ok());
}
