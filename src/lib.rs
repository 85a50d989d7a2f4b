//! Customer Portal Client Library
//!
//! A Rust client for the customer management API: sign in or register,
//! keep the session token, and list, create and delete customers.

pub mod app;
pub mod auth;
pub mod config;
pub mod customers;
pub mod error;
pub mod fetch;
pub mod screens;

pub use customer_portal_validation as validation;

use std::sync::Arc;

use crate::app::App;
use crate::auth::{Auth, FileStorage, MemoryStorage, PersistentSessionStore, SessionStore, Storage};
use crate::config::ClientOptions;
use crate::customers::CustomerClient;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::screens::RouteGuard;

/// The main entry point for the customer portal client
pub struct CustomerPortal {
    /// Client options
    pub options: ClientOptions,
    /// Where the session lives
    session: Arc<dyn SessionStore>,
    /// Request pipeline shared by every sub-client
    api: ApiClient,
    /// Auth client for the login, register and logout flows
    auth: Auth,
    /// Customer endpoints
    customers: CustomerClient,
}

impl CustomerPortal {
    /// Create a client with the session store implied by `options`
    ///
    /// # Example
    ///
    /// ```
    /// use customer_portal::{CustomerPortal, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_api_url("http://localhost:3333");
    /// let portal = CustomerPortal::new(options).unwrap();
    /// assert!(!portal.auth().is_authenticated());
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self> {
        let storage: Arc<dyn Storage> = if options.persist_session {
            Arc::new(FileStorage::new(options.session_dir.clone()))
        } else {
            Arc::new(MemoryStorage::new())
        };

        Self::with_session_store(options, Arc::new(PersistentSessionStore::new(storage)))
    }

    /// Create a client around a caller-provided session store
    pub fn with_session_store(options: ClientOptions, session: Arc<dyn SessionStore>) -> Result<Self> {
        let api = ApiClient::new(&options, session.clone())?;
        let auth = Auth::new(api.clone(), session.clone());
        let customers = CustomerClient::new(api.clone());

        Ok(Self {
            options,
            session,
            api,
            auth,
            customers,
        })
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the customer client
    pub fn customers(&self) -> &CustomerClient {
        &self.customers
    }

    /// The shared request pipeline
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> Arc<dyn SessionStore> {
        self.session.clone()
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone())
    }

    /// A routed application subscribed to this client's session events
    pub fn app(&self) -> App {
        App::new(
            self.auth.clone(),
            Arc::new(self.customers.clone()),
            self.route_guard(),
            self.session.subscribe(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{SessionEvent, SessionStore, UserProfile};
    pub use crate::config::ClientOptions;
    pub use crate::customers::{Customer, CustomerApi};
    pub use crate::error::Error;
    pub use crate::screens::Route;
    pub use crate::validation::{ContactForm, LoginForm, RegisterForm};
    pub use crate::CustomerPortal;
}
