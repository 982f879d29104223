//! Route guards

use crate::{
    navigation::{Navigator, Route},
    services::AuthState,
};

/// What a guarded screen should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth context still initializing
    Loading,
    RedirectToLogin,
    /// Signed in, but the role is not on the allow-list
    AccessDenied,
    Render,
}

/// Requires a signed-in user
pub fn protected(auth: &AuthState) -> GuardDecision {
    if auth.loading {
        GuardDecision::Loading
    } else if !auth.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Render
    }
}

/// Requires a signed-in user whose role is in `allowed` (case-insensitive)
pub fn role_protected(auth: &AuthState, allowed: &[&str]) -> GuardDecision {
    match protected(auth) {
        GuardDecision::Render if !auth.has_role(allowed) => GuardDecision::AccessDenied,
        decision => decision,
    }
}

/// Guard configured for a route
pub fn for_route(auth: &AuthState, route: Route) -> GuardDecision {
    if route.is_public() {
        return GuardDecision::Render;
    }
    match route.allowed_roles() {
        Some(roles) => role_protected(auth, roles),
        None => protected(auth),
    }
}

impl Navigator {
    /// Enter a route through its guard. Only a `Render` decision changes the
    /// current route; a redirect moves to the login screen.
    pub fn enter(&self, route: Route, auth: &AuthState) -> GuardDecision {
        let decision = for_route(auth, route);
        match decision {
            GuardDecision::Render => self.navigate(route),
            GuardDecision::RedirectToLogin => {
                self.redirect_to_login();
            }
            GuardDecision::AccessDenied => {
                tracing::warn!(
                    "Access to {} denied for role '{}'",
                    route,
                    auth.user.as_ref().map(|u| u.role()).unwrap_or_default()
                );
            }
            GuardDecision::Loading => {}
        }
        decision
    }
}
