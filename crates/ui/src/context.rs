use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use planes_core::Clock;
use planes_core::model::Session;
use services::{PlanService, ProfileService, SessionService};

use crate::routes::Route;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionService>;
    fn plans(&self) -> Arc<PlanService>;
    fn profiles(&self) -> Arc<ProfileService>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionService>,
    plans: Arc<PlanService>,
    profiles: Arc<ProfileService>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            plans: app.plans(),
            profiles: app.profiles(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn plans(&self) -> Arc<PlanService> {
        Arc::clone(&self.plans)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive mirror of the session held by `SessionService`.
///
/// Views read it to render user data; the route guard subscribes to it so a
/// login or logout re-evaluates the current route.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    current: Signal<Option<Session>>,
}

impl SessionHandle {
    #[must_use]
    pub fn new(current: Signal<Option<Session>>) -> Self {
        Self { current }
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn set(&mut self, session: Option<Session>) {
        self.current.set(session);
    }
}

/// Provide the `SessionHandle` seeded from the service's current session.
pub fn use_session_provider(ctx: &AppContext) -> SessionHandle {
    let session = ctx.session();
    let current = use_signal(move || session.current());
    use_context_provider(|| SessionHandle::new(current))
}

/// End the session everywhere and go back to the login route.
pub fn use_logout() -> Callback<()> {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<SessionHandle>();
    let navigator = use_navigator();
    use_callback(move |()| {
        ctx.session().logout();
        session.set(None);
        navigator.replace(Route::Login {});
    })
}
