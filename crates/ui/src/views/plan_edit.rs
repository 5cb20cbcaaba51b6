use dioxus::prelude::*;
use planes_core::model::{LessonPlan, PlanId, TeacherProfile};
use services::PlanDraftEditor;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ErrorBanner, PlanForm, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct EditData {
    plan: LessonPlan,
    profile: TeacherProfile,
}

#[component]
pub fn PlanEditView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let plans = ctx.plans();
    let profiles = ctx.profiles();

    let resource = use_resource(move || {
        let plans = plans.clone();
        let profiles = profiles.clone();
        let current = session.current();
        let plan_id = PlanId::new(id.clone());
        async move {
            let current = current.ok_or(ViewError::NotAuthenticated)?;
            let plan = plans.get(&plan_id).await?;
            let profile = profiles.load(&current).await?.unwrap_or_default();
            Ok::<_, ViewError>(EditData { plan, profile })
        }
    });

    match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "page", "Cargando..." }
        },
        // A missing plan stays on this route with the banner.
        ViewState::Error(err) => rsx! {
            div { class: "page",
                h2 { class: "view-title", "Editar Plan Educativo" }
                ErrorBanner { error: err }
            }
        },
        ViewState::Ready(data) => rsx! {
            PlanForm {
                profile: data.profile,
                initial: PlanDraftEditor::for_plan(data.plan),
                title: "Editar Plan Educativo",
                submit_label: "Actualizar Plan",
                success_message: "Plan educativo actualizado correctamente.",
            }
        },
    }
}
