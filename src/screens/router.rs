use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::error::Error;

/// The application's screens, addressed by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    /// The customer list, only reachable with a session
    Customers,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Customers => "/",
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Customers)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "/login" => Ok(Self::Login),
            "/register" => Ok(Self::Register),
            "/" | "" => Ok(Self::Customers),
            other => Err(Error::config(format!("unknown route {}", other))),
        }
    }
}

/// Keeps session-only screens away from anonymous users
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Checked at render time against the current session
    pub fn permits(&self, route: Route) -> bool {
        !route.requires_session() || self.session.is_authenticated()
    }

    /// The route to actually render; protected routes redirect to login
    pub fn resolve(&self, requested: Route) -> Route {
        if self.permits(requested) {
            requested
        } else {
            tracing::debug!("redirecting {} to {}", requested, Route::Login);
            Route::Login
        }
    }
}
