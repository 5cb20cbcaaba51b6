use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{SessionHandle, use_logout};
use crate::vm::{MenuTarget, menu_items};

#[component]
pub fn MenuView() -> Element {
    let session = use_context::<SessionHandle>();
    let logout = use_logout();

    let Some(current) = session.current() else {
        return rsx! {};
    };
    let items = menu_items(current.role());

    rsx! {
        div { class: "page menu-page",
            h2 { class: "view-title", "¡Bienvenido, {current.user_name()}!" }
            div { class: "menu-grid",
                for item in items {
                    {match item.target {
                        MenuTarget::Route(route) => rsx! {
                            Link { key: "{item.label}", class: "menu-card", to: route, "{item.label}" }
                        },
                        MenuTarget::Logout => rsx! {
                            button {
                                key: "{item.label}",
                                class: "menu-card menu-card--exit",
                                r#type: "button",
                                onclick: move |_| logout.call(()),
                                "{item.label}"
                            }
                        },
                    }}
                }
            }
        }
    }
}
