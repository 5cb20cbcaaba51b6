use dioxus::prelude::*;
use planes_core::model::{TeacherProfile, UnitField};
use services::PlanDraftEditor;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ConfirmDialog, ErrorBanner, Toast, ViewError};
use crate::vm::{carrera_options, materia_options};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingConfirm {
    Submit,
    Clear,
}

/// Unidad builder shared by plan creation and plan editing.
#[component]
pub fn PlanForm(
    profile: TeacherProfile,
    initial: PlanDraftEditor,
    title: String,
    submit_label: String,
    success_message: String,
) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let mut editor = use_signal(move || initial);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<String>);
    let mut pending = use_signal(|| None::<PendingConfirm>);
    let mut saving = use_signal(|| false);

    let snapshot = editor.read().clone();
    let form = snapshot.form().clone();
    let editing = snapshot.drafts().is_editing();
    let busy = saving();

    let mut carreras = carrera_options(&profile);
    if !form.carrera.is_empty() && !carreras.contains(&form.carrera) {
        carreras.push(form.carrera.clone());
    }
    let mut materias = materia_options(&profile, &form.carrera);
    if !form.materia.is_empty() && !materias.contains(&form.materia) {
        materias.push(form.materia.clone());
    }

    let plans = ctx.plans();
    let confirm_submit = move |()| {
        pending.set(None);
        let submission = editor.read().prepare_submission();
        let submission = match submission {
            Ok(submission) => submission,
            Err(err) => {
                error.set(Some(err.into()));
                return;
            }
        };
        let Some(current) = session.current() else {
            error.set(Some(ViewError::NotAuthenticated));
            return;
        };
        let plans = plans.clone();
        let success_message = success_message.clone();
        let submitted = submission.drafts.clone();
        saving.set(true);
        spawn(async move {
            match plans.submit(submission, &current).await {
                Ok(id) => {
                    editor.write().mark_submitted(&submitted, id);
                    error.set(None);
                    notice.set(Some(success_message));
                }
                Err(err) => error.set(Some(err.into())),
            }
            saving.set(false);
        });
    };

    let field_inputs = UnitField::PER_UNIT.into_iter().map(|field| {
        let mut editor = editor;
        let value = form.get(field).to_string();
        rsx! {
            div { key: "{field}", class: "field",
                label { r#for: "unit-{field}", "{field.label()}" }
                textarea {
                    id: "unit-{field}",
                    rows: "2",
                    value: "{value}",
                    disabled: busy,
                    oninput: move |evt| editor.write().set_field(field, evt.value()),
                }
            }
        }
    });

    let draft_rows = snapshot.drafts().iter().enumerate().map(|(index, draft)| {
        let fields = draft.fields().clone();
        let mut editor = editor;
        let mut error = error;
        let mut notice = notice;
        rsx! {
            tr { key: "{draft.id()}",
                td { "{fields.unidad}" }
                td { "{fields.objetivos}" }
                td { "{fields.tiempo}" }
                td { class: "actions",
                    button {
                        class: "btn btn-small",
                        r#type: "button",
                        disabled: editing || busy,
                        onclick: move |_| {
                            let result = editor.write().edit_draft(index);
                            if let Err(err) = result {
                                error.set(Some(err.into()));
                            }
                        },
                        "Editar"
                    }
                    button {
                        class: "btn btn-small btn-danger",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| {
                            let result = editor.write().delete_draft(index);
                            match result {
                                Ok(()) => notice.set(Some("Unidad eliminada correctamente.".into())),
                                Err(err) => error.set(Some(err.into())),
                            }
                        },
                        "Eliminar"
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "page plan-page",
            h2 { class: "view-title", "{title}" }
            if let Some(err) = error() {
                ErrorBanner { error: err, on_dismiss: move |_| error.set(None) }
            }
            if let Some(message) = notice() {
                Toast { key: "{message}", message, on_close: move |_| notice.set(None) }
            }

            div { class: "field-row",
                div { class: "field",
                    label { r#for: "plan-carrera", "Carrera" }
                    select {
                        id: "plan-carrera",
                        value: "{form.carrera}",
                        disabled: busy,
                        onchange: move |evt| {
                            let mut state = editor.write();
                            state.set_field(UnitField::Carrera, evt.value());
                            state.set_field(UnitField::Materia, "");
                        },
                        option { value: "", disabled: true, "Seleccione una carrera" }
                        if carreras.is_empty() {
                            option { value: "", disabled: true, "No hay carreras disponibles" }
                        }
                        for carrera in carreras {
                            option { key: "{carrera}", value: "{carrera}", "{carrera}" }
                        }
                    }
                }
                div { class: "field",
                    label { r#for: "plan-materia", "Materia" }
                    select {
                        id: "plan-materia",
                        value: "{form.materia}",
                        disabled: busy,
                        onchange: move |evt| editor.write().set_field(UnitField::Materia, evt.value()),
                        option { value: "", disabled: true, "Seleccione una materia" }
                        if materias.is_empty() {
                            option { value: "", disabled: true, "No hay materias disponibles" }
                        }
                        for materia in materias {
                            option { key: "{materia}", value: "{materia}", "{materia}" }
                        }
                    }
                }
            }

            {field_inputs}

            div { class: "form-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| {
                        let result = editor.write().add_draft();
                        match result {
                            Ok(_) => {
                                error.set(None);
                                notice.set(Some("Unidad agregada correctamente.".into()));
                            }
                            Err(err) => error.set(Some(err.into())),
                        }
                    },
                    if editing { "Actualizar Unidad" } else { "Agregar Unidad" }
                }
                if editing {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| {
                            let result = editor.write().cancel_edit();
                            if let Err(err) = result {
                                error.set(Some(err.into()));
                            }
                        },
                        "Cancelar Edición"
                    }
                }
            }

            h3 { class: "section-title", "Unidades" }
            if snapshot.drafts().is_empty() {
                p { class: "empty", "No se ha agregado ninguna unidad." }
            } else {
                table { class: "draft-table",
                    thead {
                        tr {
                            th { "Unidad" }
                            th { "Objetivos" }
                            th { "Tiempo" }
                            th { "Acciones" }
                        }
                    }
                    tbody { {draft_rows} }
                }
            }

            div { class: "form-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| pending.set(Some(PendingConfirm::Submit)),
                    if busy { "Guardando..." } else { "{submit_label}" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| pending.set(Some(PendingConfirm::Clear)),
                    "Limpiar Formulario"
                }
            }
        }

        {match pending() {
            Some(PendingConfirm::Submit) => rsx! {
                ConfirmDialog {
                    title: "Confirmar Guardado",
                    body: "¿Deseás guardar este plan educativo?",
                    confirm_label: "Guardar",
                    busy,
                    on_cancel: move |_| pending.set(None),
                    on_confirm: confirm_submit,
                }
            },
            Some(PendingConfirm::Clear) => rsx! {
                ConfirmDialog {
                    title: "Confirmar Limpieza",
                    body: "Se descartarán todas las unidades agregadas.",
                    confirm_label: "Limpiar",
                    on_cancel: move |_| pending.set(None),
                    on_confirm: move |_| {
                        pending.set(None);
                        editor.write().clear();
                        error.set(None);
                        notice.set(Some("Formulario limpiado exitosamente.".into()));
                    },
                }
            },
            None => rsx! {},
        }}
    }
}
