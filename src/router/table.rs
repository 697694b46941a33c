//! Static route table.
//!
//! Every view is registered once at startup together with its access policy.
//! The table is immutable afterwards.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DRIVER: &str = "driver";
pub const ROLE_HELPER: &str = "helper";

/// Who may reach a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a session.
    Public,
    /// Any authenticated role.
    Authenticated,
    /// Authenticated, and the token's role must be one of these.
    Roles(BTreeSet<String>),
}

impl Access {
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Roles(roles.into_iter().map(Into::into).collect())
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Public)
    }

    pub fn allowed_roles(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Roles(roles) => Some(roles),
            _ => None,
        }
    }

    /// Whether a session holding `role` satisfies the role restriction.
    pub fn admits(&self, role: Option<&str>) -> bool {
        match self {
            Self::Public | Self::Authenticated => true,
            Self::Roles(roles) => role.is_some_and(|r| roles.contains(r)),
        }
    }
}

/// The screens of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Landing,
    Login,
    ForgotPassword,
    ResetPassword,
    Homepage,
    Users,
    Admin,
    Vehicles,
    Orders,
    Forms,
    Submissions,
    Expenses,
    Finance,
    Reports,
    Performance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub view: View,
    pub access: Access,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: View, access: Access) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
            access,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: String,
    default_path: String,
}

impl RouteTable {
    /// Build a table. Both redirect targets must be registered, and the login
    /// route must be public so a redirect to it always lands.
    pub fn new(
        routes: Vec<Route>,
        login_path: impl Into<String>,
        default_path: impl Into<String>,
    ) -> Result<Self> {
        let table = Self {
            routes,
            login_path: login_path.into(),
            default_path: default_path.into(),
        };

        let login = table
            .find(&table.login_path)
            .ok_or_else(|| Error::Config(format!("login route {} is not registered", table.login_path)))?;
        if login.access != Access::Public {
            return Err(Error::Config(format!(
                "login route {} must be public",
                table.login_path
            )));
        }
        if table.find(&table.default_path).is_none() {
            return Err(Error::Config(format!(
                "default route {} is not registered",
                table.default_path
            )));
        }
        Ok(table)
    }

    /// The console's routes.
    pub fn standard_routes() -> Vec<Route> {
        let admin = || Access::roles([ROLE_ADMIN]);
        vec![
            Route::new("/", "Landing", View::Landing, Access::Public),
            Route::new("/login", "Login", View::Login, Access::Public),
            Route::new("/forgot-password", "ForgotPassword", View::ForgotPassword, Access::Public),
            Route::new("/reset-password", "ResetPassword", View::ResetPassword, Access::Public),
            Route::new("/homepage", "Homepage", View::Homepage, Access::Authenticated),
            Route::new("/users", "Users", View::Users, admin()),
            Route::new("/admin", "Admin", View::Admin, admin()),
            Route::new("/vehicles", "Vehicles", View::Vehicles, admin()),
            Route::new(
                "/orders",
                "Orders",
                View::Orders,
                Access::roles([ROLE_ADMIN, ROLE_DRIVER, ROLE_HELPER]),
            ),
            Route::new("/forms", "Forms", View::Forms, admin()),
            Route::new("/submissions", "Submissions", View::Submissions, admin()),
            Route::new(
                "/expenses",
                "Expenses",
                View::Expenses,
                Access::roles([ROLE_ADMIN, ROLE_DRIVER]),
            ),
            Route::new("/finance", "Finance", View::Finance, admin()),
            Route::new("/reports", "Reports", View::Reports, admin()),
            Route::new("/performance", "Performance", View::Performance, admin()),
        ]
    }

    pub fn standard() -> Self {
        Self {
            routes: Self::standard_routes(),
            login_path: "/login".to_string(),
            default_path: "/homepage".to_string(),
        }
    }

    /// Exact path lookup. A trailing slash and any query string are ignored.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        self.routes.iter().find(|r| r.path == normalized)
    }

    pub fn login_route(&self) -> &Route {
        self.find(&self.login_path)
            .unwrap_or_else(|| unreachable!("login route checked at construction"))
    }

    pub fn default_route(&self) -> &Route {
        self.find(&self.default_path)
            .unwrap_or_else(|| unreachable!("default route checked at construction"))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Navigation bar entries for a session holding `role`.
    pub fn menu(&self, role: Option<&str>) -> Vec<&Route> {
        let Some(role) = role else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|r| r.access.requires_auth() && r.access.admits(Some(role)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_policies() {
        assert!(!Access::Public.requires_auth());
        assert!(Access::Authenticated.requires_auth());
        assert!(Access::Authenticated.allowed_roles().is_none());

        let admin = Access::roles(["admin"]);
        assert!(admin.requires_auth());
        assert!(admin.admits(Some("admin")));
        assert!(!admin.admits(Some("driver")));
        assert!(!admin.admits(None));
    }

    #[test]
    fn test_find_normalizes_path() {
        let table = RouteTable::standard();
        assert_eq!(table.find("/users/").unwrap().view, View::Users);
        assert_eq!(table.find("/users?page=2").unwrap().view, View::Users);
        assert_eq!(table.find("").unwrap().view, View::Landing);
        assert!(table.find("/nowhere").is_none());
    }

    #[test]
    fn test_new_rejects_missing_or_protected_login() {
        let routes = RouteTable::standard_routes();
        assert!(RouteTable::new(routes.clone(), "/signin", "/homepage").is_err());
        assert!(RouteTable::new(routes.clone(), "/users", "/homepage").is_err());
        assert!(RouteTable::new(routes.clone(), "/login", "/dashboard").is_err());
        assert!(RouteTable::new(routes, "/login", "/homepage").is_ok());
    }

    #[test]
    fn test_menu_by_role() {
        let table = RouteTable::standard();
        assert!(table.menu(None).is_empty());

        let driver: Vec<_> = table.menu(Some("driver")).iter().map(|r| r.view).collect();
        assert_eq!(driver, vec![View::Homepage, View::Orders, View::Expenses]);

        let admin = table.menu(Some("admin"));
        assert!(admin.iter().any(|r| r.view == View::Users));
        assert!(admin.iter().all(|r| r.access.requires_auth()));
    }
}
