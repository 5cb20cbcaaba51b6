//! Shared error types for the services crate.

use thiserror::Error;

use planes_core::model::PlanId;
use storage::remote::RemoteStoreError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionService::login`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("user name and PIN are required")]
    MissingCredentials,
    #[error("invalid user name or PIN")]
    InvalidCredentials,
    #[error(transparent)]
    Service(#[from] StorageError),
}

/// Errors emitted when submitting the draft list as a lesson plan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("add at least one unit before submitting")]
    EmptyDraftList,
    #[error("finish or cancel the unit being edited before submitting")]
    EditPending,
    #[error("the plan has no carrera or materia")]
    MissingPlanContext,
    #[error("plan {0} no longer exists")]
    PlanNotFound(PlanId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PlanService` reads and deletes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanServiceError {
    #[error("plan {0} not found")]
    NotFound(PlanId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
}
