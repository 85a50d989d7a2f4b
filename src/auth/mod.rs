//! Authentication and session management

mod session;
mod storage;
mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::ApiClient;

pub use session::*;
pub use storage::*;
pub use types::*;

/// Client for the login, register and logout flows
#[derive(Clone)]
pub struct Auth {
    /// Request pipeline shared with the other clients
    api: ApiClient,

    /// Where successful sign-ins are persisted
    session: Arc<dyn SessionStore>,
}

impl Auth {
    pub(crate) fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    /// Sign in with email and password and persist the returned session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let result = self
            .api
            .post("/auth/login")
            .json(&LoginRequest { email, password })?
            .execute::<AuthResponse>()
            .await?;

        self.session.save(&result.token, result.user.as_ref())?;
        Ok(result)
    }

    /// Create an account and persist the returned session.
    ///
    /// An already registered email comes back as [`crate::Error::Conflict`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let result = self
            .api
            .post("/auth/register")
            .json(&RegisterRequest { name, email, password })?
            .execute::<AuthResponse>()
            .await?;

        self.session.save(&result.token, result.user.as_ref())?;
        Ok(result)
    }

    /// Drop the local session. Subscribers of the session store receive
    /// [`SessionEvent::Cleared`] and must discard their state.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The cached profile of the signed-in user
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current_user()
    }

    /// Get the current session
    pub fn get_session(&self) -> Option<Session> {
        self.session.session()
    }
}
