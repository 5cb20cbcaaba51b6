use dioxus::prelude::*;
use planes_core::model::{DraftError, SubjectField, UnitField, ValidationError};
use services::{AuthError, PlanServiceError, ProfileServiceError, SubmitError};

/// Every failure a view can show, mapped to one user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    MissingCredentials,
    InvalidCredentials,
    AuthUnavailable,
    MissingField(UnitField),
    MissingSubjectField(SubjectField),
    InvalidHours(SubjectField),
    EditInProgress,
    EmptyDraftList,
    EditPending,
    MissingPlanContext,
    NotAuthenticated,
    PlanCreationNotAllowed,
    NotFound,
    StoreUnavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            ViewError::MissingCredentials => "Ingrese usuario y PIN.".into(),
            ViewError::InvalidCredentials => "Usuario o PIN incorrectos.".into(),
            ViewError::AuthUnavailable => {
                "No se pudo verificar el usuario. Intente de nuevo más tarde.".into()
            }
            ViewError::MissingField(field) => {
                format!("Complete el campo \"{}\".", field.label())
            }
            ViewError::MissingSubjectField(field) => {
                format!("Complete el campo \"{}\".", subject_label(field))
            }
            ViewError::InvalidHours(field) => format!(
                "\"{}\" debe ser un número entero no negativo.",
                subject_label(field)
            ),
            ViewError::EditInProgress => "Ya hay una unidad en edición.".into(),
            ViewError::EmptyDraftList => "Agregue al menos una unidad antes de enviar.".into(),
            ViewError::EditPending => {
                "Termine o cancele la edición de la unidad antes de enviar.".into()
            }
            ViewError::MissingPlanContext => "Seleccione la carrera y la materia.".into(),
            ViewError::NotAuthenticated => "La sesión ha finalizado.".into(),
            ViewError::PlanCreationNotAllowed => {
                "Su rol no permite registrar planes educativos.".into()
            }
            ViewError::NotFound => "El plan solicitado no existe.".into(),
            ViewError::StoreUnavailable => {
                "No se pudo acceder a los datos. Intente de nuevo.".into()
            }
            ViewError::Unknown => "Ocurrió un error. Intente de nuevo.".into(),
        }
    }
}

fn subject_label(field: SubjectField) -> &'static str {
    match field {
        SubjectField::Carrera => "Carrera",
        SubjectField::Materia => "Materia",
        SubjectField::HorasTotales => "Horas Totales",
        SubjectField::HorasSemanales => "Horas Semanales",
    }
}

impl From<ValidationError> for ViewError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField(field) => ViewError::MissingField(field),
            ValidationError::MissingSubjectField(field) => ViewError::MissingSubjectField(field),
            ValidationError::InvalidHours { field, .. } => ViewError::InvalidHours(field),
            _ => ViewError::Unknown,
        }
    }
}

impl From<DraftError> for ViewError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::EditInProgress => ViewError::EditInProgress,
            _ => ViewError::Unknown,
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ViewError::MissingCredentials,
            AuthError::InvalidCredentials => ViewError::InvalidCredentials,
            _ => ViewError::AuthUnavailable,
        }
    }
}

impl From<SubmitError> for ViewError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::EmptyDraftList => ViewError::EmptyDraftList,
            SubmitError::EditPending => ViewError::EditPending,
            SubmitError::MissingPlanContext => ViewError::MissingPlanContext,
            SubmitError::PlanNotFound(_) => ViewError::NotFound,
            _ => ViewError::StoreUnavailable,
        }
    }
}

impl From<PlanServiceError> for ViewError {
    fn from(err: PlanServiceError) -> Self {
        match err {
            PlanServiceError::NotFound(_) => ViewError::NotFound,
            _ => ViewError::StoreUnavailable,
        }
    }
}

impl From<ProfileServiceError> for ViewError {
    fn from(_: ProfileServiceError) -> Self {
        ViewError::StoreUnavailable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::model::PlanId;
    use storage::repository::StorageError;

    #[test]
    fn service_errors_map_to_banners() {
        assert_eq!(
            ViewError::from(AuthError::Service(StorageError::Unavailable("x".into()))),
            ViewError::AuthUnavailable
        );
        assert_eq!(
            ViewError::from(SubmitError::PlanNotFound(PlanId::new("p"))),
            ViewError::NotFound
        );
        assert_eq!(
            ViewError::from(SubmitError::Storage(StorageError::Conflict)),
            ViewError::StoreUnavailable
        );
    }

    #[test]
    fn missing_field_message_names_the_label() {
        let msg = ViewError::from(ValidationError::MissingField(UnitField::Tiempo)).message();
        assert!(msg.contains("Tiempo de Ejecución"), "{msg}");
    }
}
