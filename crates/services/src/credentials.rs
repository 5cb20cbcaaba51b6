use std::sync::Arc;

use async_trait::async_trait;
use planes_core::model::UserRecord;
use storage::repository::{StorageError, UserRepository};

/// Decides whether a user name and PIN identify a known user.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// The matching user record, `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the user records cannot be read.
    async fn verify(&self, username: &str, pin: u32) -> Result<Option<UserRecord>, StorageError>;
}

/// Compares against the plaintext PINs of the `users` collection.
#[derive(Clone)]
pub struct PlaintextPinVerifier {
    users: Arc<dyn UserRepository>,
}

impl PlaintextPinVerifier {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CredentialVerifier for PlaintextPinVerifier {
    async fn verify(&self, username: &str, pin: u32) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.list_users().await?;
        Ok(users.into_iter().find(|user| user.matches(username, pin)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::model::Role;
    use storage::repository::Storage;

    #[tokio::test]
    async fn matches_name_case_insensitively_and_pin_exactly() {
        let storage = Storage::in_memory();
        storage
            .users
            .upsert_user(&UserRecord {
                name: "Ana".into(),
                pin: 1234,
                role: Role::Docente,
            })
            .await
            .unwrap();
        let verifier = PlaintextPinVerifier::new(Arc::clone(&storage.users));

        assert!(verifier.verify("ana", 1234).await.unwrap().is_some());
        assert!(verifier.verify("Ana", 1235).await.unwrap().is_none());
        assert!(verifier.verify("Luis", 1234).await.unwrap().is_none());
    }
}
