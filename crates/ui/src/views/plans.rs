use dioxus::prelude::*;
use dioxus_router::use_navigator;
use planes_core::model::{PlanId, TeacherProfile};

use crate::context::{AppContext, SessionHandle};
use crate::routes::Route;
use crate::views::{ConfirmDialog, ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CarreraVm, PlanRowVm, map_carreras, map_plan_rows};

#[derive(Clone, Debug, PartialEq)]
struct PlansData {
    profile: Option<TeacherProfile>,
    rows: Vec<PlanRowVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeleteState {
    Idle,
    Deleting,
}

#[component]
pub fn PlansView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let navigator = use_navigator();
    let plans = ctx.plans();
    let profiles = ctx.profiles();
    let mut delete_target = use_signal(|| None::<PlanId>);
    let mut delete_state = use_signal(|| DeleteState::Idle);
    let mut delete_error = use_signal(|| None::<ViewError>);

    let plans_for_resource = plans.clone();
    let resource = use_resource(move || {
        let plans = plans_for_resource.clone();
        let profiles = profiles.clone();
        let current = session.current();
        async move {
            let current = current.ok_or(ViewError::NotAuthenticated)?;
            let profile = profiles.load(&current).await?;
            let mine = plans.list_for(&current).await?;
            Ok::<_, ViewError>(PlansData {
                profile,
                rows: map_plan_rows(&mine),
            })
        }
    });

    let confirm_delete = move |()| {
        let Some(id) = delete_target() else {
            return;
        };
        let Some(current) = session.current() else {
            delete_error.set(Some(ViewError::NotAuthenticated));
            return;
        };
        let plans = plans.clone();
        delete_state.set(DeleteState::Deleting);
        spawn(async move {
            match plans.delete(&id, &current).await {
                Ok(()) => {
                    delete_error.set(None);
                    let mut resource = resource;
                    resource.restart();
                }
                Err(err) => delete_error.set(Some(err.into())),
            }
            delete_target.set(None);
            delete_state.set(DeleteState::Idle);
        });
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page plans-page",
            h2 { class: "view-title", "Datos del Docente y Planes Educativos" }
            if let Some(err) = delete_error() {
                ErrorBanner { error: err, on_dismiss: move |_| delete_error.set(None) }
            }
            {match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Cargando..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Reintentar"
                    }
                },
                ViewState::Ready(data) => {
                    let rows = data.rows.iter().map(|row| {
                        let edit_id = row.plan_id.as_str().to_string();
                        let delete_id = row.plan_id.clone();
                        let mut delete_target = delete_target;
                        rsx! {
                            tr { key: "{row.key}",
                                td { "{row.carrera}" }
                                td { "{row.materia}" }
                                td { "{row.unidad}" }
                                td { "{row.objetivos}" }
                                td { "{row.situaciones}" }
                                td { "{row.estrategias}" }
                                td { "{row.recursos}" }
                                td { "{row.tiempo}" }
                                td { "{row.fecha}" }
                                td { class: "actions",
                                    button {
                                        class: "btn btn-small btn-warning",
                                        r#type: "button",
                                        onclick: move |_| {
                                            navigator.push(Route::Form2 { id: edit_id.clone() });
                                        },
                                        "Editar"
                                    }
                                    button {
                                        class: "btn btn-small btn-danger",
                                        r#type: "button",
                                        onclick: move |_| delete_target.set(Some(delete_id.clone())),
                                        "Eliminar"
                                    }
                                }
                            }
                        }
                    });
                    rsx! {
                        TeacherPanel { profile: data.profile.clone() }
                        table { class: "plans-table",
                            thead {
                                tr {
                                    th { "Carrera" }
                                    th { "Materia" }
                                    th { "Unidad" }
                                    th { "Objetivos" }
                                    th { "Situaciones" }
                                    th { "Estrategias" }
                                    th { "Recursos" }
                                    th { "Tiempo" }
                                    th { "Fecha" }
                                    th { "Acciones" }
                                }
                            }
                            tbody {
                                if data.rows.is_empty() {
                                    tr {
                                        td { colspan: "10", class: "empty",
                                            "No hay planes educativos disponibles."
                                        }
                                    }
                                }
                                {rows}
                            }
                        }
                    }
                }
            }}
        }
        if delete_target().is_some() {
            ConfirmDialog {
                title: "Confirmar Eliminación",
                body: "¿Estás seguro de que deseas eliminar este registro?",
                confirm_label: "Eliminar",
                busy: delete_state() == DeleteState::Deleting,
                on_cancel: move |_| delete_target.set(None),
                on_confirm: confirm_delete,
            }
        }
    }
}

#[component]
fn TeacherPanel(profile: Option<TeacherProfile>) -> Element {
    let Some(profile) = profile else {
        return rsx! {
            section { class: "teacher-panel",
                p { class: "empty", "No se encontraron datos registrados para el docente." }
            }
        };
    };
    let carreras: Vec<CarreraVm> = map_carreras(&profile);

    rsx! {
        section { class: "teacher-panel",
            dl { class: "teacher-data",
                dt { "Nombre:" }
                dd { "{profile.nombre}" }
                dt { "Cédula:" }
                dd { "{profile.cedula}" }
                dt { "Facultad:" }
                dd { "{profile.facultad}" }
            }
            h3 { class: "section-title", "Carreras" }
            if carreras.is_empty() {
                p { class: "empty", "No hay carreras asignadas." }
            } else {
                ul { class: "carrera-list",
                    for carrera in carreras {
                        li { key: "{carrera.nombre}",
                            strong { "{carrera.nombre}" }
                            span { class: "secondary", "{carrera.summary}" }
                        }
                    }
                }
            }
        }
    }
}
