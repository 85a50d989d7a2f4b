//! The routed application: screens, current route and session reset handling

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

use customer_portal_validation::{LoginForm, RegisterForm};

use crate::auth::{Auth, SessionEvent};
use crate::customers::CustomerApi;
use crate::error::Result;
use crate::screens::{CustomerListScreen, LoginScreen, RegisterScreen, Route, RouteGuard};

pub struct App {
    auth: Auth,
    customer_api: Arc<dyn CustomerApi>,
    guard: RouteGuard,
    events: broadcast::Receiver<SessionEvent>,
    route: Route,
    login: LoginScreen,
    register: RegisterScreen,
    customers: Option<CustomerListScreen>,
}

impl App {
    pub fn new(auth: Auth, customer_api: Arc<dyn CustomerApi>, guard: RouteGuard, events: broadcast::Receiver<SessionEvent>) -> Self {
        Self {
            login: LoginScreen::new(auth.clone()),
            register: RegisterScreen::new(auth.clone()),
            auth,
            customer_api,
            guard,
            events,
            route: Route::Login,
            customers: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Go to `requested`, or wherever the guard sends us instead. Entering
    /// the customer list mounts it, which loads the collection.
    pub async fn navigate(&mut self, requested: Route) -> Route {
        self.sync();

        let route = self.guard.resolve(requested);
        if route == Route::Customers && self.customers.is_none() {
            let mut screen = CustomerListScreen::new(self.customer_api.clone());
            screen.mount().await;
            self.customers = Some(screen);
        }

        self.route = route;
        route
    }

    pub async fn submit_login(&mut self, form: LoginForm) -> Route {
        if let Some(next) = self.login.submit(form).await {
            self.navigate(next).await;
        }
        self.route
    }

    pub async fn submit_register(&mut self, form: RegisterForm) -> Route {
        if let Some(next) = self.register.submit(form).await {
            self.navigate(next).await;
        }
        self.route
    }

    /// Sign out; the resulting reset lands the app on the login screen
    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout()?;
        self.sync();
        Ok(())
    }

    /// Apply pending session events
    pub fn sync(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Cleared) => self.reset(),
                Ok(SessionEvent::SignedIn) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("missed {} session events, resetting", skipped);
                    self.reset();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Drop all state that belonged to the previous session
    fn reset(&mut self) {
        tracing::debug!("session cleared, resetting screens");
        self.login = LoginScreen::new(self.auth.clone());
        self.register = RegisterScreen::new(self.auth.clone());
        self.customers = None;
        self.route = Route::Login;
    }

    pub fn login_screen(&self) -> &LoginScreen {
        &self.login
    }

    pub fn register_screen(&self) -> &RegisterScreen {
        &self.register
    }

    /// The customer list, present only while it is mounted
    pub fn customers_screen(&self) -> Option<&CustomerListScreen> {
        self.customers.as_ref()
    }

    pub fn customers_screen_mut(&mut self) -> Option<&mut CustomerListScreen> {
        self.customers.as_mut()
    }
}
