use customer_portal_validation::{LoginForm, ValidationErrors};

use crate::auth::Auth;
use crate::screens::{Route, LOGIN_FAILED};

/// The login form
pub struct LoginScreen {
    auth: Auth,
    form: LoginForm,
    errors: ValidationErrors,
    message: Option<String>,
}

impl LoginScreen {
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            form: LoginForm::default(),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Inline message shown above the form after a failed attempt
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Validate and sign in. Returns the route to go to on success.
    pub async fn submit(&mut self, form: LoginForm) -> Option<Route> {
        self.form = form;
        self.message = None;

        let credentials = match self.form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };
        self.errors = ValidationErrors::new();

        match self.auth.login(&credentials.email, &credentials.password).await {
            Ok(_) => Some(Route::Customers),
            Err(err) => {
                tracing::error!("Login failed: {}", err);
                self.message = Some(LOGIN_FAILED.to_string());
                None
            }
        }
    }

    pub fn go_to_register(&self) -> Route {
        Route::Register
    }
}
