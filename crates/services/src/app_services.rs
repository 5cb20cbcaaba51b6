use std::sync::Arc;

use storage::remote::RemoteConfig;
use storage::repository::Storage;
use storage::session_store::SessionStore;

use crate::Clock;
use crate::credentials::PlaintextPinVerifier;
use crate::error::AppServicesError;
use crate::plan_service::PlanService;
use crate::profile_service::ProfileService;
use crate::session_service::SessionService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionService>,
    plans: Arc<PlanService>,
    profiles: Arc<ProfileService>,
}

impl AppServices {
    /// Wire services over an already built `Storage`.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        session_store: Arc<dyn SessionStore>,
        clock: Clock,
    ) -> Self {
        let verifier = Arc::new(PlaintextPinVerifier::new(Arc::clone(&storage.users)));
        let session = Arc::new(SessionService::new(verifier, session_store));
        let plans = Arc::new(PlanService::new(clock, Arc::clone(&storage.plans)));
        let profiles = Arc::new(ProfileService::new(Arc::clone(&storage.teachers)));
        Self {
            session,
            plans,
            profiles,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        session_store: Arc<dyn SessionStore>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, session_store, clock))
    }

    /// Build services backed by the remote document API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the remote configuration is invalid.
    pub fn new_remote(
        config: RemoteConfig,
        session_store: Arc<dyn SessionStore>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::remote(config)?;
        Ok(Self::from_storage(&storage, session_store, clock))
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn plans(&self) -> Arc<PlanService> {
        Arc::clone(&self.plans)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }
}
