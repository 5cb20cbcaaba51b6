use std::fmt;

use crate::model::ids::PlanId;

/// Every navigable location of the application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AppPath {
    Login,
    /// Landing page after login.
    Principal,
    /// Role-filtered menu.
    Gestion,
    /// Create a lesson plan.
    Form1,
    /// Edit the lesson plan with the given key.
    Form2(PlanId),
    RegistrarDatos,
    Datos,
}

impl AppPath {
    /// Where an authenticated user lands.
    pub const LANDING: AppPath = AppPath::Principal;

    /// Parse a route path. Anything unrecognised resolves to `Login`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => AppPath::Login,
            ["principal"] => AppPath::Principal,
            ["gestion"] => AppPath::Gestion,
            ["form1"] => AppPath::Form1,
            ["form2", id] => id.parse().map_or(AppPath::Login, AppPath::Form2),
            ["registrar-datos"] => AppPath::RegistrarDatos,
            ["datos"] => AppPath::Datos,
            _ => AppPath::Login,
        }
    }

    #[must_use]
    pub fn as_path(&self) -> String {
        match self {
            AppPath::Login => "/login".to_string(),
            AppPath::Principal => "/principal".to_string(),
            AppPath::Gestion => "/gestion".to_string(),
            AppPath::Form1 => "/form1".to_string(),
            AppPath::Form2(id) => format!("/form2/{id}"),
            AppPath::RegistrarDatos => "/registrar-datos".to_string(),
            AppPath::Datos => "/datos".to_string(),
        }
    }

    /// Every path except the login page needs a session.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self, AppPath::Login)
    }

    /// The path actually shown for a navigation request to `self`.
    #[must_use]
    pub fn resolve(self, authenticated: bool) -> AppPath {
        match (authenticated, self.is_protected()) {
            (false, true) => AppPath::Login,
            (true, false) => AppPath::LANDING,
            (_, _) => self,
        }
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protected() -> Vec<AppPath> {
        vec![
            AppPath::Principal,
            AppPath::Gestion,
            AppPath::Form1,
            AppPath::Form2(PlanId::new("abc")),
            AppPath::RegistrarDatos,
            AppPath::Datos,
        ]
    }

    #[test]
    fn parse_round_trips_known_paths() {
        for path in protected().into_iter().chain([AppPath::Login]) {
            assert_eq!(AppPath::parse(&path.as_path()), path);
        }
    }

    #[test]
    fn unknown_paths_resolve_to_login() {
        for raw in ["/", "", "/nope", "/form2", "/form2/", "/datos/extra"] {
            assert_eq!(AppPath::parse(raw), AppPath::Login, "{raw}");
        }
        assert_eq!(AppPath::parse("/datos?x=1"), AppPath::Datos);
    }

    #[test]
    fn unauthenticated_requests_go_to_login() {
        for path in protected() {
            assert_eq!(path.resolve(false), AppPath::Login);
        }
        assert_eq!(AppPath::Login.resolve(false), AppPath::Login);
    }

    #[test]
    fn authenticated_login_request_goes_to_landing() {
        assert_eq!(AppPath::Login.resolve(true), AppPath::Principal);
        for path in protected() {
            assert_eq!(path.clone().resolve(true), path);
        }
    }
}
