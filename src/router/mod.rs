//! Route table and guarded navigation.
//!
//! # Architecture
//!
//! - [`RouteTable`]: routes registered at startup with their [`Access`] policy
//! - [`NavigationGuard`]: resolves one transition to a [`Navigation`] outcome
//! - [`Router`]: applies the guard and follows redirects to the view that
//!   finally renders
//!
//! # Example
//!
//! ```rust
//! use fleet_admin::router::{Navigation, Router, RouteTable, View};
//! use fleet_admin::security::{MemorySessionStore, Session};
//!
//! let router = Router::new(RouteTable::standard(), Session::new(MemorySessionStore::new()));
//! let resolved = router.navigate("/users");
//!
//! assert_eq!(resolved.outcome, Navigation::RedirectToLogin);
//! assert_eq!(resolved.route.view, View::Login);
//! ```

pub mod guard;
pub mod table;

pub use guard::{Navigation, NavigationGuard};
pub use table::{Access, ROLE_ADMIN, ROLE_DRIVER, ROLE_HELPER, Route, RouteTable, View};

use tracing::{info, warn};

use crate::security::Session;

/// Redirects followed before giving up and landing on the login route.
const MAX_REDIRECTS: usize = 4;

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Path that was asked for.
    pub requested: String,
    /// Route that renders.
    pub route: Route,
    /// Guard outcome for the first hop.
    pub outcome: Navigation,
    /// Number of redirects followed.
    pub hops: usize,
}

#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
}

impl Router {
    pub fn new(table: RouteTable, session: Session) -> Self {
        Self::with_guard(table, NavigationGuard::new(session))
    }

    pub fn with_guard(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Navigate to `path`, re-checking every redirect target.
    pub fn navigate(&self, path: &str) -> Resolved {
        let mut target = match self.table.find(path) {
            Some(route) => route,
            None => {
                warn!(name: "navigation.unknown_route", path = %path, "Unknown route, using default");
                self.table.default_route()
            }
        };

        let outcome = self.guard.check(target);
        let mut step = outcome;
        let mut hops = 0;

        while step != Navigation::Proceed {
            if hops == MAX_REDIRECTS {
                warn!(name: "navigation.redirect_loop", path = %path, "Too many redirects, stopping at login");
                target = self.table.login_route();
                break;
            }
            target = match step {
                Navigation::RedirectToLogin => self.table.login_route(),
                Navigation::RedirectToDefault => self.table.default_route(),
                Navigation::Proceed => target,
            };
            hops += 1;
            step = self.guard.check(target);
        }

        info!(name: "navigation.resolved", requested = %path, route = %target.path, hops, "Navigation resolved");
        Resolved {
            requested: path.to_string(),
            route: target.clone(),
            outcome,
            hops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::MemorySessionStore;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn router() -> Router {
        Router::new(RouteTable::standard(), Session::new(MemorySessionStore::new()))
    }

    fn login_as(router: &Router, role: &str) {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = encode(
            &Header::default(),
            &json!({ "role": role, "exp": exp }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        router.guard().session().store_token(&token).unwrap();
    }

    #[test]
    fn test_anonymous_lands_on_login() {
        let resolved = router().navigate("/vehicles");
        assert_eq!(resolved.outcome, Navigation::RedirectToLogin);
        assert_eq!(resolved.route.view, View::Login);
        assert_eq!(resolved.hops, 1);
    }

    #[test]
    fn test_wrong_role_lands_on_default() {
        let router = router();
        login_as(&router, "helper");

        let resolved = router.navigate("/finance");
        assert_eq!(resolved.outcome, Navigation::RedirectToDefault);
        assert_eq!(resolved.route.view, View::Homepage);
    }

    #[test]
    fn test_unknown_path_goes_to_default() {
        let router = router();
        login_as(&router, "admin");
        let resolved = router.navigate("/does-not-exist");
        assert_eq!(resolved.outcome, Navigation::Proceed);
        assert_eq!(resolved.route.view, View::Homepage);

        let anonymous = self::router().navigate("/does-not-exist");
        assert_eq!(anonymous.route.view, View::Login);
    }

    #[test]
    fn test_redirect_chain_is_bounded() {
        // Default route that itself requires a role nobody has.
        let routes = vec![
            Route::new("/login", "Login", View::Login, Access::Public),
            Route::new("/home", "Home", View::Homepage, Access::roles(["nobody"])),
        ];
        let table = RouteTable::new(routes, "/login", "/home").unwrap();
        let router = Router::new(table, Session::new(MemorySessionStore::new()));
        login_as(&router, "admin");

        let resolved = router.navigate("/home");
        assert_eq!(resolved.route.view, View::Login);
        assert_eq!(resolved.hops, MAX_REDIRECTS);
    }
}
