use std::sync::{Arc, RwLock};

use planes_core::model::{AppPath, Session};
use storage::session_store::SessionStore;
use tracing::{info, warn};

use crate::credentials::CredentialVerifier;
use crate::error::AuthError;

/// Session guard: owns the current session and gates navigation.
///
/// The session lives in this object (shared through `Arc`), mirrored to a
/// `SessionStore` so a restart can pick it up again.
pub struct SessionService {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl SessionService {
    #[must_use]
    pub fn new(verifier: Arc<dyn CredentialVerifier>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            verifier,
            store,
            current: RwLock::new(None),
        }
    }

    fn set_current(&self, session: Option<Session>) {
        if let Ok(mut guard) = self.current.write() {
            *guard = session;
        }
    }

    /// Pick up a session persisted by an earlier run.
    ///
    /// A record that cannot be read is discarded and treated as logged out.
    pub fn restore(&self) -> Option<Session> {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "discarding unreadable stored session");
                if let Err(err) = self.store.clear() {
                    warn!(error = %err, "failed to clear stored session");
                }
                None
            }
        };
        if let Some(session) = &session {
            info!(user = session.user_name(), role = %session.role(), "session restored");
        }
        self.set_current(session.clone());
        session
    }

    /// Authenticate `username`/`pin` and start a session.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingCredentials` when either input is blank.
    /// - `AuthError::InvalidCredentials` when the PIN is not a number or no
    ///   user matches.
    /// - `AuthError::Service` when the user records cannot be read.
    ///
    /// The current session is left unchanged on error.
    pub async fn login(&self, username: &str, pin: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        let pin = pin.trim();
        if username.is_empty() || pin.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let pin: u32 = pin.parse().map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.verifier.verify(username, pin).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(user = username, "login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                warn!(error = %err, "credential lookup failed");
                return Err(AuthError::Service(err));
            }
        };
        let session = Session::for_user(&user).map_err(|_| AuthError::InvalidCredentials)?;

        if let Err(err) = self.store.save(&user) {
            warn!(error = %err, "failed to persist session");
        }
        self.set_current(Some(session.clone()));
        info!(user = session.user_name(), role = %session.role(), "login succeeded");
        Ok(session)
    }

    /// End the session. Never fails; storage problems are only logged.
    pub fn logout(&self) {
        self.set_current(None);
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored session");
        }
        info!("logged out");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// The route to show for a navigation request to `target`.
    #[must_use]
    pub fn require_auth(&self, target: AppPath) -> AppPath {
        target.resolve(self.is_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use planes_core::model::{PlanId, Role, UserRecord};
    use storage::repository::{Storage, StorageError};
    use storage::session_store::{InMemorySessionStore, KEY_IS_AUTHENTICATED, KEY_USER_NAME};

    use crate::credentials::PlaintextPinVerifier;

    struct UnreachableVerifier;

    #[async_trait]
    impl CredentialVerifier for UnreachableVerifier {
        async fn verify(&self, _: &str, _: u32) -> Result<Option<UserRecord>, StorageError> {
            Err(StorageError::Unavailable("offline".into()))
        }
    }

    async fn service_with_ana() -> (SessionService, Arc<InMemorySessionStore>) {
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
        let store = Arc::new(InMemorySessionStore::new());
        let service = SessionService::new(
            Arc::new(PlaintextPinVerifier::new(Arc::clone(&storage.users))),
            Arc::clone(&store) as Arc<dyn SessionStore>,
        );
        (service, store)
    }

    #[tokio::test]
    async fn login_success_persists_and_lands_on_principal() {
        let (service, store) = service_with_ana().await;

        let session = service.login("Ana", "1234").await.unwrap();
        assert_eq!(session.user_name(), "Ana");
        assert_eq!(session.role(), Role::Docente);
        assert!(service.is_authenticated());
        assert_eq!(store.raw(KEY_IS_AUTHENTICATED).as_deref(), Some("true"));
        assert_eq!(service.require_auth(AppPath::Login), AppPath::Principal);
    }

    #[tokio::test]
    async fn unknown_credentials_leave_session_unauthenticated() {
        let (service, store) = service_with_ana().await;

        for (user, pin) in [("Ana", "4321"), ("Luis", "1234"), ("Ana", "12a4")] {
            assert!(matches!(
                service.login(user, pin).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(!service.is_authenticated());
        assert_eq!(store.raw(KEY_USER_NAME), None);
    }

    #[tokio::test]
    async fn blank_inputs_are_missing_credentials() {
        let (service, _) = service_with_ana().await;
        assert!(matches!(
            service.login("  ", "1234").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            service.login("Ana", "").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_service_error() {
        let service = SessionService::new(
            Arc::new(UnreachableVerifier),
            Arc::new(InMemorySessionStore::new()),
        );
        assert!(matches!(
            service.login("Ana", "1234").await,
            Err(AuthError::Service(StorageError::Unavailable(_)))
        ));
        assert!(!service.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_state_and_storage() {
        let (service, store) = service_with_ana().await;
        service.login("ana", "1234").await.unwrap();

        service.logout();
        assert!(!service.is_authenticated());
        assert_eq!(store.raw(KEY_IS_AUTHENTICATED), None);
        service.logout();
    }

    #[tokio::test]
    async fn restore_reads_persisted_session() {
        let (service, store) = service_with_ana().await;
        service.login("Ana", "1234").await.unwrap();

        let fresh = SessionService::new(
            Arc::new(UnreachableVerifier),
            store as Arc<dyn SessionStore>,
        );
        assert!(!fresh.is_authenticated());
        let restored = fresh.restore().unwrap();
        assert_eq!(restored.user_name(), "Ana");
        assert!(fresh.is_authenticated());
    }

    #[tokio::test]
    async fn protected_routes_redirect_when_logged_out() {
        let (service, _) = service_with_ana().await;
        for path in [
            AppPath::Principal,
            AppPath::Gestion,
            AppPath::Form1,
            AppPath::Form2(PlanId::new("p1")),
            AppPath::RegistrarDatos,
            AppPath::Datos,
        ] {
            assert_eq!(service.require_auth(path), AppPath::Login);
        }
        assert_eq!(service.require_auth(AppPath::Login), AppPath::Login);
    }
}
