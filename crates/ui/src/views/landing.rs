use std::time::Duration;

use chrono::Local;
use dioxus::prelude::*;

use crate::context::{AppContext, SessionHandle};
use crate::vm::format_long_date;

const REFRESH_EVERY: Duration = Duration::from_secs(60);

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let clock = ctx.clock();
    let mut now = use_signal(move || clock.now());

    use_future(move || async move {
        loop {
            tokio::time::sleep(REFRESH_EVERY).await;
            now.set(clock.now());
        }
    });

    let name = session
        .current()
        .map(|current| current.user_name().to_string())
        .unwrap_or_else(|| "Docente".to_string());
    let today = format_long_date(&now().with_timezone(&Local));

    rsx! {
        div { class: "page landing-page",
            h2 { class: "view-title", "Bienvenido, {name}" }
            p { class: "view-subtitle", "Hoy es: {today}" }
        }
    }
}
