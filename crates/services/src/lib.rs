#![forbid(unsafe_code)]

pub mod app_services;
pub mod credentials;
pub mod error;
pub mod plan_editor;
pub mod plan_service;
pub mod profile_service;
pub mod session_service;

pub use planes_core::Clock;

pub use app_services::AppServices;
pub use credentials::{CredentialVerifier, PlaintextPinVerifier};
pub use error::{AppServicesError, AuthError, PlanServiceError, ProfileServiceError, SubmitError};
pub use plan_editor::PlanDraftEditor;
pub use plan_service::{PlanService, PlanSubmission};
pub use profile_service::ProfileService;
pub use session_service::SessionService;
