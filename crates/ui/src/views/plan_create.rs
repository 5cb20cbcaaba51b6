use dioxus::prelude::*;
use services::PlanDraftEditor;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ErrorBanner, PlanForm, ViewError, ViewState, view_state_from_resource};

#[component]
pub fn PlanCreateView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let profiles = ctx.profiles();

    let resource = use_resource(move || {
        let profiles = profiles.clone();
        let current = session.current();
        async move {
            let current = current.ok_or(ViewError::NotAuthenticated)?;
            if !current.role().can_create_plans() {
                return Err(ViewError::PlanCreationNotAllowed);
            }
            let profile = profiles.load(&current).await?.unwrap_or_default();
            Ok::<_, ViewError>(profile)
        }
    });

    match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "page", "Cargando..." }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page",
                ErrorBanner { error: err }
            }
        },
        ViewState::Ready(profile) => rsx! {
            if profile.carreras().is_empty() {
                p { class: "hint",
                    "No se encontraron datos registrados para el docente. Registre sus carreras y materias primero."
                }
            }
            PlanForm {
                profile,
                initial: PlanDraftEditor::new(),
                title: "Registrar Plan Educativo",
                submit_label: "Guardar Plan",
                success_message: "Plan registrado correctamente.",
            }
        },
    }
}
