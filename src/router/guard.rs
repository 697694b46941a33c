//! Per-navigation authorization check.

use tracing::{debug, info, warn};

use super::table::Route;
use crate::security::{Session, claims};

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    RedirectToLogin,
    RedirectToDefault,
}

/// Decides, for each attempted transition, whether the current session may
/// reach the target route.
///
/// The guard keeps no state between calls. Each check re-reads the session
/// store, so a logout made elsewhere is seen by the next navigation.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: Session,
    clock: fn() -> i64,
}

impl NavigationGuard {
    pub fn new(session: Session) -> Self {
        Self::with_clock(session, claims::now_secs)
    }

    /// Guard that reads the current time (seconds since the epoch) from `clock`.
    pub fn with_clock(session: Session, clock: fn() -> i64) -> Self {
        Self { session, clock }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve a navigation to `target`. Never fails.
    ///
    /// An expired token is erased before anything else is looked at, even on
    /// public routes; the erase happens before the outcome is returned.
    pub fn check(&self, target: &Route) -> Navigation {
        let token = self.session.token();
        let authenticated = token.is_some();

        if let Some(token) = token.as_deref() {
            if claims::is_expired_at(token, (self.clock)()) {
                if let Err(err) = self.session.clear() {
                    warn!(name: "session.clear.failed", error = %err, "Could not erase expired token");
                }
                info!(name: "session.expired", route = %target.path, "Session expired, redirecting to login");
                return Navigation::RedirectToLogin;
            }
        }

        if target.access.requires_auth() && !authenticated {
            info!(name: "navigation.redirect", route = %target.path, reason = "unauthenticated", "Redirecting to login");
            return Navigation::RedirectToLogin;
        }

        if let Some(allowed) = target.access.allowed_roles() {
            let role = self.session.role();
            return match role {
                Some(role) if allowed.contains(&role) => {
                    debug!(name: "navigation.proceed", route = %target.path, role = %role, "Navigation allowed");
                    Navigation::Proceed
                }
                role => {
                    info!(
                        name: "navigation.redirect",
                        route = %target.path,
                        role = role.as_deref().unwrap_or("<none>"),
                        reason = "role",
                        "Role not permitted, redirecting to default"
                    );
                    Navigation::RedirectToDefault
                }
            };
        }

        debug!(name: "navigation.proceed", route = %target.path, "Navigation allowed");
        Navigation::Proceed
    }
}
