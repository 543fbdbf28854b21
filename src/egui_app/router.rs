//! Client-side routes and the route guard

use std::fmt;

use crate::egui_app::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Home,
    Profile,
    SignIn,
    SignUp,
    About,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Landing,
        Route::Home,
        Route::Profile,
        Route::SignIn,
        Route::SignUp,
        Route::About,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Home => "/home",
            Route::Profile => "/profile",
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::About => "/about",
        }
    }

    /// Paths match case-insensitively and ignore a trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let normalized = path.trim().trim_end_matches('/').to_ascii_lowercase();
        let normalized = if normalized.is_empty() { "/" } else { normalized.as_str() };
        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Home | Route::Profile)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    pub fn route(self) -> Route {
        match self {
            Resolution::Render(route) | Resolution::Redirect(route) => route,
        }
    }
}

/// Keeps protected views from rendering without a session
pub struct RouteGuard;

impl RouteGuard {
    pub fn resolve(route: Route, session: Option<&Session>) -> Resolution {
        if route.is_protected() && session.is_none() {
            Resolution::Redirect(Route::SignIn)
        } else {
            Resolution::Render(route)
        }
    }
}

/// Current location, always a route the guard allowed
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigate through the guard; returns where we actually ended up.
    pub fn navigate(&mut self, target: Route, session: Option<&Session>) -> Resolution {
        let resolution = RouteGuard::resolve(target, session);
        if let Resolution::Redirect(to) = resolution {
            tracing::debug!("Route guard redirected {} -> {}", target, to);
        }
        self.current = resolution.route();
        resolution
    }

    /// Re-check the current route against the session, e.g. once per frame.
    pub fn enforce(&mut self, session: Option<&Session>) -> Route {
        if let Resolution::Redirect(to) = RouteGuard::resolve(self.current, session) {
            tracing::debug!("Session missing on {}, redirecting to {}", self.current, to);
            self.current = to;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::{BearerToken, UserProfile};

    fn session() -> Session {
        Session {
            token: BearerToken::new("tok").unwrap(),
            user: UserProfile::default(),
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path(""), Some(Route::Landing));
        assert_eq!(Route::from_path("/signUp"), Some(Route::SignUp));
        assert_eq!(Route::from_path("/home/"), Some(Route::Home));
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_guard_redirects_protected_routes() {
        assert_eq!(
            RouteGuard::resolve(Route::Home, None),
            Resolution::Redirect(Route::SignIn)
        );
        assert_eq!(
            RouteGuard::resolve(Route::Profile, None),
            Resolution::Redirect(Route::SignIn)
        );
        assert_eq!(
            RouteGuard::resolve(Route::About, None),
            Resolution::Render(Route::About)
        );
        assert_eq!(
            RouteGuard::resolve(Route::Home, Some(&session())),
            Resolution::Render(Route::Home)
        );
    }

    #[test]
    fn test_enforce_moves_off_protected_route() {
        let session = session();
        let mut router = Router::default();
        router.navigate(Route::Profile, Some(&session));
        assert_eq!(router.current(), Route::Profile);

        assert_eq!(router.enforce(None), Route::SignIn);
    }

    #[test]
    fn test_navigate_stores_resolved_route() {
        let mut router = Router::default();
        assert_eq!(
            router.navigate(Route::Home, None),
            Resolution::Redirect(Route::SignIn)
        );
        assert_eq!(router.current(), Route::SignIn);
    }
}
