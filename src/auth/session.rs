//! Session management for authentication

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::auth::storage::Storage;
use crate::auth::types::UserProfile;
use crate::error::Result;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the cached user profile
pub const USER_KEY: &str = "user";

const EVENT_CAPACITY: usize = 16;

/// Session data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token
    pub token: String,

    /// Cached profile, advisory only
    pub user: Option<UserProfile>,
}

/// Session lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    /// Every piece of in-memory state tied to the old session must be dropped
    Cleared,
}

/// Holds the auth token and cached user profile
pub trait SessionStore: Send + Sync {
    /// Persist a new session, replacing any prior one
    fn save(&self, token: &str, user: Option<&UserProfile>) -> Result<()>;

    /// Remove the session and notify subscribers with [`SessionEvent::Cleared`]
    fn clear(&self) -> Result<()>;

    fn token(&self) -> Option<String>;

    fn current_user(&self) -> Option<UserProfile>;

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// True iff a token is present. Nothing is checked against the server.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn session(&self) -> Option<Session> {
        self.token().map(|token| Session {
            token,
            user: self.current_user(),
        })
    }
}

/// [`SessionStore`] over a key/value [`Storage`]
pub struct PersistentSessionStore {
    storage: Arc<dyn Storage>,
    events: broadcast::Sender<SessionEvent>,
}

impl PersistentSessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { storage, events }
    }

    fn notify(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

impl SessionStore for PersistentSessionStore {
    fn save(&self, token: &str, user: Option<&UserProfile>) -> Result<()> {
        // Drop the old profile first so a failed write never pairs it with the new token
        self.storage.remove_item(USER_KEY)?;
        self.storage.set_item(TOKEN_KEY, token)?;
        if let Some(user) = user {
            self.storage.set_item(USER_KEY, &serde_json::to_string(user)?)?;
        }
        tracing::info!("session saved");
        self.notify(SessionEvent::SignedIn);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        tracing::info!("session cleared");
        self.notify(SessionEvent::Cleared);
        Ok(())
    }

    fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                tracing::error!("failed to read session token: {}", err);
                None
            }
        }
    }

    fn current_user(&self) -> Option<UserProfile> {
        let raw = match self.storage.get_item(USER_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::error!("failed to read cached user: {}", err);
                return None;
            }
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) if !user.as_value().is_null() => Some(user),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("discarding unreadable cached user: {}", err);
                if let Err(err) = self.storage.remove_item(USER_KEY) {
                    tracing::error!("failed to remove cached user: {}", err);
                }
                None
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
