use std::time::Duration;

use dioxus::prelude::*;

use crate::views::ViewError;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[component]
pub fn ConfirmDialog(
    title: String,
    body: String,
    confirm_label: String,
    #[props(default)] busy: bool,
    on_cancel: EventHandler<()>,
    on_confirm: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{title}" }
                p { class: "modal-body", "{body}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancelar"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}

/// Inline error with an optional close button.
#[component]
pub fn ErrorBanner(error: ViewError, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "banner banner-error", role: "alert",
            span { "{error.message()}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "banner-close",
                    r#type: "button",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}

/// Success message that closes itself after a few seconds.
#[component]
pub fn Toast(message: String, on_close: EventHandler<()>) -> Element {
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(TOAST_TTL).await;
            on_close.call(());
        });
    });

    rsx! {
        div { class: "toast", role: "status",
            span { "{message}" }
            button {
                class: "banner-close",
                r#type: "button",
                onclick: move |_| on_close.call(()),
                "×"
            }
        }
    }
}
