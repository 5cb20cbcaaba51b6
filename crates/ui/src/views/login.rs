use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, SessionHandle};
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError};

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<SessionHandle>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut pin = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let service = ctx.session();
        let name = username();
        let pin_value = pin();
        busy.set(true);
        spawn(async move {
            match service.login(&name, &pin_value).await {
                Ok(current) => {
                    error.set(None);
                    session.set(Some(current));
                    navigator.replace(Route::Principal {});
                }
                Err(err) => {
                    pin.set(String::new());
                    error.set(Some(ViewError::from(err)));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page login-page",
            h2 { class: "view-title", "Iniciar Sesión" }
            if let Some(err) = error() {
                ErrorBanner {
                    error: err,
                    on_dismiss: move |_| error.set(None),
                }
            }
            form { class: "login-form", onsubmit: on_submit,
                label { r#for: "login-user", "Ingrese su usuario" }
                input {
                    id: "login-user",
                    r#type: "text",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "login-pin", "Ingrese su PIN" }
                input {
                    id: "login-pin",
                    r#type: "password",
                    inputmode: "numeric",
                    value: "{pin}",
                    oninput: move |evt| pin.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Ingresando..." } else { "Ingresar" }
                }
            }
        }
    }
}
