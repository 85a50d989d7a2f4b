use customer_portal_validation::{RegisterForm, ValidationErrors};

use crate::auth::Auth;
use crate::error::Error;
use crate::screens::{Route, EMAIL_ALREADY_REGISTERED, REGISTER_FAILED};

/// Server message of the 409 sent for a taken email
pub const EMAIL_TAKEN_SERVER_MESSAGE: &str = "Email already registered";

/// The registration form
pub struct RegisterScreen {
    auth: Auth,
    form: RegisterForm,
    errors: ValidationErrors,
    message: Option<String>,
}

impl RegisterScreen {
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            form: RegisterForm::default(),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn form(&self) -> &RegisterForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Validate and create the account. Returns the route to go to on success.
    pub async fn submit(&mut self, form: RegisterForm) -> Option<Route> {
        self.form = form;
        self.message = None;

        let registration = match self.form.validate() {
            Ok(registration) => registration,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };
        self.errors = ValidationErrors::new();

        let result = self
            .auth
            .register(&registration.name, &registration.email, &registration.password)
            .await;

        match result {
            Ok(_) => Some(Route::Customers),
            Err(err) => {
                tracing::error!("Registration failed: {}", err);
                self.message = Some(failure_message(&err).to_string());
                None
            }
        }
    }

    pub fn go_to_login(&self) -> Route {
        Route::Login
    }
}

/// What the user sees for a failed registration
pub fn failure_message(err: &Error) -> &'static str {
    if err.is_conflict() && err.server_message() == Some(EMAIL_TAKEN_SERVER_MESSAGE) {
        EMAIL_ALREADY_REGISTERED
    } else {
        REGISTER_FAILED
    }
}
