use dioxus::prelude::*;
use planes_core::model::{SubjectDraft, TeacherProfile};

use crate::context::{AppContext, SessionHandle};
use crate::views::{ErrorBanner, Toast, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_carreras;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let profiles = ctx.profiles();

    let resource = use_resource(move || {
        let profiles = profiles.clone();
        let current = session.current();
        async move {
            let current = current.ok_or(ViewError::NotAuthenticated)?;
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
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let mut resource = resource;
                        resource.restart();
                    },
                    "Reintentar"
                }
            }
        },
        ViewState::Ready(profile) => rsx! {
            ProfileForm { initial: profile }
        },
    }
}

#[component]
fn ProfileForm(initial: TeacherProfile) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let mut profile = use_signal(move || initial);
    let mut subject = use_signal(SubjectDraft::default);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let current_profile = profile.read().clone();
    let draft = subject.read().clone();
    let carreras = map_carreras(&current_profile);

    let profiles = ctx.profiles();
    let save = move |_| {
        let Some(current) = session.current() else {
            error.set(Some(ViewError::NotAuthenticated));
            return;
        };
        let profiles = profiles.clone();
        let snapshot = profile.read().clone();
        saving.set(true);
        spawn(async move {
            match profiles.save(&current, &snapshot).await {
                Ok(()) => {
                    error.set(None);
                    notice.set(Some("Datos guardados correctamente".into()));
                }
                Err(err) => error.set(Some(err.into())),
            }
            saving.set(false);
        });
    };

    let carrera_cards = carreras.into_iter().map(|carrera| {
        let chips = carrera.chips.into_iter().map(|chip| {
            let mut profile = profile;
            let mut error = error;
            rsx! {
                span { key: "{chip.materia_index}", class: "chip",
                    "{chip.label}"
                    button {
                        class: "chip-remove",
                        r#type: "button",
                        title: "Eliminar materia",
                        onclick: move |_| {
                            let result = profile
                                .write()
                                .remove_materia(chip.carrera_index, chip.materia_index);
                            if result.is_err() {
                                error.set(Some(ViewError::Unknown));
                            }
                        },
                        "×"
                    }
                }
            }
        });
        rsx! {
            div { key: "{carrera.nombre}", class: "carrera-card",
                h4 { "{carrera.nombre}" }
                div { class: "chips", {chips} }
            }
        }
    });

    rsx! {
        div { class: "page profile-page",
            h2 { class: "view-title", "Datos del Docente" }
            if let Some(err) = error() {
                ErrorBanner { error: err, on_dismiss: move |_| error.set(None) }
            }
            if let Some(message) = notice() {
                Toast { key: "{message}", message, on_close: move |_| notice.set(None) }
            }

            div { class: "field-row",
                div { class: "field",
                    label { r#for: "docente-facultad", "Facultad" }
                    input {
                        id: "docente-facultad",
                        value: "{current_profile.facultad}",
                        oninput: move |evt| profile.write().facultad = evt.value(),
                    }
                }
                div { class: "field",
                    label { r#for: "docente-nombre", "Nombre" }
                    input {
                        id: "docente-nombre",
                        value: "{current_profile.nombre}",
                        oninput: move |evt| profile.write().nombre = evt.value(),
                    }
                }
                div { class: "field",
                    label { r#for: "docente-cedula", "Cédula" }
                    input {
                        id: "docente-cedula",
                        value: "{current_profile.cedula}",
                        oninput: move |evt| profile.write().cedula = evt.value(),
                    }
                }
            }

            h3 { class: "section-title", "Agregar Carreras y Materias" }
            div { class: "field-row",
                div { class: "field",
                    label { r#for: "materia-carrera", "Carrera" }
                    input {
                        id: "materia-carrera",
                        value: "{draft.carrera}",
                        oninput: move |evt| subject.write().carrera = evt.value(),
                    }
                }
                div { class: "field",
                    label { r#for: "materia-nombre", "Materia" }
                    input {
                        id: "materia-nombre",
                        value: "{draft.materia}",
                        oninput: move |evt| subject.write().materia = evt.value(),
                    }
                }
                div { class: "field",
                    label { r#for: "materia-horas-totales", "Horas Totales" }
                    input {
                        id: "materia-horas-totales",
                        r#type: "number",
                        min: "0",
                        value: "{draft.horas_totales}",
                        oninput: move |evt| subject.write().horas_totales = evt.value(),
                    }
                }
                div { class: "field",
                    label { r#for: "materia-horas-semanales", "Horas Semanales" }
                    input {
                        id: "materia-horas-semanales",
                        r#type: "number",
                        min: "0",
                        value: "{draft.horas_semanales}",
                        oninput: move |evt| subject.write().horas_semanales = evt.value(),
                    }
                }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    let result = subject.read().validate();
                    match result {
                        Ok((carrera, materia)) => {
                            profile.write().add_materia(&carrera, materia);
                            subject.set(SubjectDraft::default());
                            error.set(None);
                        }
                        Err(err) => error.set(Some(err.into())),
                    }
                },
                "Agregar Materia"
            }

            h3 { class: "section-title", "Carreras y Materias Registradas" }
            if current_profile.carreras().is_empty() {
                p { class: "empty", "No hay carreras asignadas." }
            }
            {carrera_cards}

            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving(),
                onclick: save,
                if saving() { "Guardando..." } else { "Guardar Datos del Docente" }
            }
        }
    }
}
