use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use planes_core::model::{AppPath, PlanId};
use tracing::debug;

use crate::context::{SessionHandle, use_logout};
use crate::views::{
    ConfirmDialog, LandingView, LoginView, MenuView, PlanCreateView, PlanEditView, PlansView,
    ProfileView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/login", LoginView)] Login {},
        #[route("/principal", LandingView)] Principal {},
        #[route("/gestion", MenuView)] Gestion {},
        #[route("/form1", PlanCreateView)] Form1 {},
        #[route("/form2/:id", PlanEditView)] Form2 { id: String },
        #[route("/registrar-datos", ProfileView)] RegistrarDatos {},
        #[route("/datos", PlansView)] Datos {},
    #[end_layout]
    #[route("/:..segments", UnmatchedRedirect)] Unmatched { segments: Vec<String> },
}

impl Route {
    /// The navigation path this route stands for. Unmatched paths are login.
    #[must_use]
    pub fn app_path(&self) -> AppPath {
        match self {
            Route::Login {} | Route::Unmatched { .. } => AppPath::Login,
            Route::Principal {} => AppPath::Principal,
            Route::Gestion {} => AppPath::Gestion,
            Route::Form1 {} => AppPath::Form1,
            Route::Form2 { id } => AppPath::Form2(PlanId::new(id.clone())),
            Route::RegistrarDatos {} => AppPath::RegistrarDatos,
            Route::Datos {} => AppPath::Datos,
        }
    }
}

impl From<AppPath> for Route {
    fn from(path: AppPath) -> Self {
        match path {
            AppPath::Login => Route::Login {},
            AppPath::Principal => Route::Principal {},
            AppPath::Gestion => Route::Gestion {},
            AppPath::Form1 => Route::Form1 {},
            AppPath::Form2(id) => Route::Form2 {
                id: id.as_str().to_string(),
            },
            AppPath::RegistrarDatos => Route::RegistrarDatos {},
            AppPath::Datos => Route::Datos {},
        }
    }
}

/// Where the guard sends a request for `route`, `None` to render it.
#[must_use]
pub fn guard_redirect(route: &Route, authenticated: bool) -> Option<Route> {
    if let Route::Unmatched { .. } = route {
        return Some(Route::Login {});
    }
    let requested = route.app_path();
    let resolved = requested.clone().resolve(authenticated);
    (resolved != requested).then(|| Route::from(resolved))
}

#[component]
fn Shell() -> Element {
    let route = use_route::<Route>();
    let session = use_context::<SessionHandle>();
    let authenticated = session.is_authenticated();

    if let Some(target) = guard_redirect(&route, authenticated) {
        let key = target.to_string();
        return rsx! {
            GuardRedirect { key: "{key}", to: target }
        };
    }

    rsx! {
        div { class: "app",
            if authenticated {
                NavBar {}
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn UnmatchedRedirect(segments: Vec<String>) -> Element {
    debug!(path = %segments.join("/"), "unmatched route");
    rsx! {
        GuardRedirect { to: Route::Login {} }
    }
}

#[component]
fn GuardRedirect(to: Route) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        navigator.replace(to.clone());
    });
    rsx! {
        p { class: "redirect", "Redirigiendo..." }
    }
}

#[component]
fn NavBar() -> Element {
    let logout = use_logout();
    let mut confirm_logout = use_signal(|| false);

    rsx! {
        nav { class: "navbar",
            h1 { class: "navbar-title", "Planes Educativos" }
            ul { class: "navbar-links",
                li { Link { to: Route::Principal {}, "Principal" } }
                li { Link { to: Route::Gestion {}, "Menú Principal" } }
                li {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| confirm_logout.set(true),
                        "Cerrar Sesión"
                    }
                }
            }
        }
        if confirm_logout() {
            ConfirmDialog {
                title: "Cerrar Sesión",
                body: "¿Deseás cerrar la sesión?",
                confirm_label: "Cerrar Sesión",
                on_cancel: move |_| confirm_logout.set(false),
                on_confirm: move |_| {
                    confirm_logout.set(false);
                    logout.call(());
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_requests_land_on_login() {
        for route in [
            Route::Principal {},
            Route::Gestion {},
            Route::Form1 {},
            Route::Form2 { id: "p1".into() },
            Route::RegistrarDatos {},
            Route::Datos {},
        ] {
            assert_eq!(guard_redirect(&route, false), Some(Route::Login {}));
        }
        assert_eq!(guard_redirect(&Route::Login {}, false), None);
    }

    #[test]
    fn logged_in_login_goes_to_landing() {
        assert_eq!(
            guard_redirect(&Route::Login {}, true),
            Some(Route::Principal {})
        );
        assert_eq!(guard_redirect(&Route::Datos {}, true), None);
        assert_eq!(
            guard_redirect(&Route::Form2 { id: "abc".into() }, true),
            None
        );
    }

    #[test]
    fn unmatched_paths_redirect_to_login() {
        let route = Route::Unmatched {
            segments: vec!["nada".into()],
        };
        assert_eq!(guard_redirect(&route, true), Some(Route::Login {}));
    }

    #[test]
    fn routes_render_their_paths() {
        assert_eq!(Route::Form2 { id: "p1".into() }.to_string(), "/form2/p1");
        assert_eq!(Route::RegistrarDatos {}.to_string(), "/registrar-datos");
        assert_eq!(
            Route::from(AppPath::parse("/form2/p1")),
            Route::Form2 { id: "p1".into() }
        );
    }
}
