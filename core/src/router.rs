//! Static route table for the app's pages.
//!
//! Routes are fixed at startup. Exact paths win; anything unmatched resolves
//! to the catch-all not-found page.

pub const LOGIN_PATH: &str = "/login";
pub const SERVER_ERROR_PATH: &str = "/server-error";

/// The pages the app can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    ServerError,
    NotFound,
}

/// A path plus whether reaching it needs a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub route: Route,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub const fn public(path: &'static str, route: Route) -> Self {
        Self {
            path,
            route,
            requires_auth: false,
        }
    }

    pub const fn protected(path: &'static str, route: Route) -> Self {
        Self {
            path,
            route,
            requires_auth: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    not_found: RouteDescriptor,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>, not_found: RouteDescriptor) -> Self {
        Self { routes, not_found }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![
                RouteDescriptor::public("/", Route::Landing),
                RouteDescriptor::public(LOGIN_PATH, Route::Login),
                RouteDescriptor::public("/signup", Route::Signup),
                RouteDescriptor::protected("/dashboard", Route::Dashboard),
                RouteDescriptor::public(SERVER_ERROR_PATH, Route::ServerError),
            ],
            RouteDescriptor::public("/:pathMatch(.*)*", Route::NotFound),
        )
    }

    /// Resolve a location to its descriptor. Query strings, fragments and a
    /// trailing slash are ignored.
    pub fn resolve(&self, location: &str) -> &RouteDescriptor {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.routes
            .iter()
            .find(|r| r.path.eq_ignore_ascii_case(path))
            .unwrap_or(&self.not_found)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().chain(std::iter::once(&self.not_found))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_paths_resolve() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/").route, Route::Landing);
        assert_eq!(table.resolve("/login").route, Route::Login);
        assert_eq!(table.resolve("/signup").route, Route::Signup);
        assert_eq!(table.resolve("/server-error").route, Route::ServerError);
    }

    #[test]
    fn only_dashboard_requires_auth() {
        let table = RouteTable::standard();
        let protected: Vec<_> = table.routes().filter(|r| r.requires_auth).collect();
        assert_eq!(protected.len(), 1);
        assert_eq!(protected[0].route, Route::Dashboard);
    }

    #[test]
    fn unknown_paths_hit_catch_all() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/nope").route, Route::NotFound);
        assert_eq!(table.resolve("/dashboard/extra").route, Route::NotFound);
        assert!(!table.resolve("/nope").requires_auth);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/dashboard/").route, Route::Dashboard);
        assert_eq!(table.resolve("/dashboard?tab=done").route, Route::Dashboard);
        assert_eq!(table.resolve("").route, Route::Landing);
    }

    #[test]
    fn paths_match_without_case() {
        let table = RouteTable::standard();
        let route = table.resolve("/Dashboard");
        assert_eq!(route.route, Route::Dashboard);
        assert!(route.requires_auth);
        assert_eq!(table.resolve("/LOGIN/").route, Route::Login);
    }
}
