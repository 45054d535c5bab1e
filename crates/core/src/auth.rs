use serde::{Deserialize, Serialize};

/// Administrator information persisted in the authenticated session.
///
/// The session only proves that a login succeeded at some point; protected
/// routes re-check the backing account row on every request before trusting
/// this identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    username: String,
}

impl AdminIdentity {
    /// Creates an identity for a successfully authenticated administrator.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Returns the unique account username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}
