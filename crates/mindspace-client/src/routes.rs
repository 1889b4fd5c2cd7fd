//! Route table and navigation guard.
//!
//! Mirrors the app's page structure: two public pages, everything else
//! behind authentication. Resolution is a pure function of the path and
//! the auth flag, so the guard is testable without any UI.

use mindspace_logic::catalogue;

/// Every addressable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    Index,
    /// Login and signup.
    Auth,
    Dashboard,
    /// Environment picker.
    Environments,
    /// Immersive session for one environment.
    EnvironmentSession(String),
    Profile,
    /// Alias page rendered by the profile screen.
    Settings,
    Analytics,
}

impl Route {
    /// Parse a path. `None` is a not-found page, not an error.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Index),
            ["auth"] => Some(Route::Auth),
            ["dashboard"] => Some(Route::Dashboard),
            ["environments"] => Some(Route::Environments),
            ["environments", id] => Some(Route::EnvironmentSession(id.to_string())),
            ["profile"] => Some(Route::Profile),
            ["settings"] => Some(Route::Settings),
            ["analytics"] => Some(Route::Analytics),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Environments => "/environments".to_string(),
            Route::EnvironmentSession(id) => format!("/environments/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Analytics => "/analytics".to_string(),
        }
    }

    /// Only the landing and auth pages are public.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Index | Route::Auth)
    }
}

/// What navigating to a path should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Show(Route),
    Redirect(Route),
    NotFound,
}

/// The navigation guard.
///
/// Protected routes redirect to the auth page when signed out. A session
/// route for an environment the catalogue does not know redirects back to
/// the picker instead of opening a broken session.
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let Some(route) = Route::parse(path) else {
        return Resolution::NotFound;
    };
    if route.requires_auth() && !authenticated {
        return Resolution::Redirect(Route::Auth);
    }
    if let Route::EnvironmentSession(id) = &route {
        if catalogue::find(id).is_none() {
            return Resolution::Redirect(Route::Environments);
        }
    }
    Resolution::Show(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes_resolve_without_auth() {
        assert_eq!(resolve("/", false), Resolution::Show(Route::Index));
        assert_eq!(resolve("/auth", false), Resolution::Show(Route::Auth));
    }

    #[test]
    fn test_protected_routes_redirect_to_auth_when_signed_out() {
        for path in ["/dashboard", "/environments", "/profile", "/settings", "/analytics"] {
            assert_eq!(
                resolve(path, false),
                Resolution::Redirect(Route::Auth),
                "{} must be protected",
                path
            );
        }
    }

    #[test]
    fn test_protected_routes_show_when_signed_in() {
        assert_eq!(resolve("/dashboard", true), Resolution::Show(Route::Dashboard));
        assert_eq!(resolve("/settings", true), Resolution::Show(Route::Settings));
    }

    #[test]
    fn test_session_route_requires_a_known_environment() {
        assert_eq!(
            resolve("/environments/forest-sanctuary", true),
            Resolution::Show(Route::EnvironmentSession("forest-sanctuary".to_string()))
        );
        assert_eq!(
            resolve("/environments/not-a-place", true),
            Resolution::Redirect(Route::Environments)
        );
        // Auth wins over the environment check.
        assert_eq!(
            resolve("/environments/not-a-place", false),
            Resolution::Redirect(Route::Auth)
        );
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(resolve("/nope", true), Resolution::NotFound);
        assert_eq!(resolve("/environments/a/b", true), Resolution::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            Route::Index,
            Route::Auth,
            Route::Dashboard,
            Route::Environments,
            Route::EnvironmentSession("zen-garden".to_string()),
            Route::Profile,
            Route::Settings,
            Route::Analytics,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
