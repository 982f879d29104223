//! Screen routes and the navigator holding the current one

use std::sync::{Arc, RwLock};

/// Roles allowed on management screens
pub const MANAGEMENT_ROLES: &[&str] = &["admin", "manager"];

/// Console screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Rooms,
    RoomTypes,
    Customers,
    Bookings,
    Services,
    Invoices,
    Statistics,
    Settings,
    Profile,
}

impl Route {
    pub const ALL: [Route; 11] = [
        Route::Login,
        Route::Dashboard,
        Route::Rooms,
        Route::RoomTypes,
        Route::Customers,
        Route::Bookings,
        Route::Services,
        Route::Invoices,
        Route::Statistics,
        Route::Settings,
        Route::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Rooms => "/rooms",
            Route::RoomTypes => "/room-types",
            Route::Customers => "/customers",
            Route::Bookings => "/bookings",
            Route::Services => "/services",
            Route::Invoices => "/invoices",
            Route::Statistics => "/statistics",
            Route::Settings => "/settings",
            Route::Profile => "/profile",
        }
    }

    /// Login is the only screen reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// Role allow-list, `None` when any authenticated user may enter
    pub fn allowed_roles(&self) -> Option<&'static [&'static str]> {
        match self {
            Route::RoomTypes | Route::Services | Route::Statistics => Some(MANAGEMENT_ROLES),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Shared handle on the current route
#[derive(Clone, Debug)]
pub struct Navigator {
    current: Arc<RwLock<Route>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: Arc::new(RwLock::new(start)),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn navigate(&self, route: Route) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        if *current != route {
            tracing::debug!("Navigating {} -> {}", *current, route);
            *current = route;
        }
    }

    /// Go to the login screen; returns false when already there
    pub fn redirect_to_login(&self) -> bool {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        if *current == Route::Login {
            return false;
        }
        tracing::info!("Redirecting {} -> {}", *current, Route::Login);
        *current = Route::Login;
        true
    }
}
