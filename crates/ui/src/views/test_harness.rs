use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use planes_core::model::{Role, UserRecord};
use planes_core::time::fixed_now;
use services::{AppServices, Clock, PlanService, ProfileService, SessionService};
use storage::repository::Storage;
use storage::session_store::InMemorySessionStore;

use crate::context::{UiApp, build_app_context, use_session_provider};
use crate::views::{
    LandingView, LoginView, MenuView, PlanCreateView, PlanEditView, PlansView, ProfileView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionService> {
        self.services.session()
    }

    fn plans(&self) -> Arc<PlanService> {
        self.services.plans()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Landing,
    Menu,
    PlanCreate,
    PlanEdit(String),
    Profile,
    Plans,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_session_provider(&ctx);
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Menu => rsx! { MenuView {} },
        ViewKind::PlanCreate => rsx! { PlanCreateView {} },
        ViewKind::PlanEdit(id) => rsx! { PlanEditView { id } },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Plans => rsx! { PlansView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Seeded accounts: Ana (docente, 1234) and Vera (verificador, 4321).
pub async fn setup_view_harness(view: ViewKind, login_as: Option<Role>) -> ViewHarness {
    setup_view_harness_with_storage(view, login_as, Storage::in_memory()).await
}

pub async fn setup_view_harness_with_storage(
    view: ViewKind,
    login_as: Option<Role>,
    storage: Storage,
) -> ViewHarness {
    for (name, pin, role) in [("Ana", 1234, Role::Docente), ("Vera", 4321, Role::Verificador)] {
        storage
            .users
            .upsert_user(&UserRecord {
                name: name.into(),
                pin,
                role,
            })
            .await
            .expect("seed user");
    }

    let services = AppServices::from_storage(
        &storage,
        Arc::new(InMemorySessionStore::new()),
        Clock::fixed(fixed_now()),
    );
    match login_as {
        Some(Role::Docente) => {
            services.session().login("Ana", "1234").await.expect("login");
        }
        Some(Role::Verificador) => {
            services.session().login("Vera", "4321").await.expect("login");
        }
        None => {}
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );

    ViewHarness { dom, storage }
}
