//! Form validation schemas for the customer portal
//!
//! Each form takes raw, possibly missing field values and either produces a
//! typed value ready to be sent to the API or a [`ValidationErrors`] map keyed
//! by field. Validation is synchronous and all-or-nothing.

mod email;
mod error;

use serde::{Deserialize, Serialize};

pub use email::is_valid_email;
pub use error::{Field, ValidationErrors};

pub const REQUIRED: &str = "Campo obrigatório";
pub const INVALID_EMAIL: &str = "Email inválido";
pub const CONTACT_NAME_TOO_SHORT: &str = "Nome deve ter no mínimo 3 caracteres";
pub const NAME_TOO_SHORT: &str = "O nome deve ter no mínimo 3 caracteres";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter no mínimo 6 caracteres";
pub const PASSWORDS_DO_NOT_MATCH: &str = "As senhas não conferem";

const MIN_NAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Raw input of the customer creation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A customer payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
}

/// Raw input of the login form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login credentials that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Raw input of the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Registration payload that passed validation; the confirmation is dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    pub fn validate(&self) -> Result<NewContact, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, Field::Name, &self.name);
        let email = required(&mut errors, Field::Email, &self.email);

        min_len(&mut errors, Field::Name, name, MIN_NAME_LEN, CONTACT_NAME_TOO_SHORT);
        email_format(&mut errors, Field::Email, email);

        errors.into_result(|| NewContact {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = required(&mut errors, Field::Email, &self.email);
        let password = required(&mut errors, Field::Password, &self.password);

        email_format(&mut errors, Field::Email, email);
        min_len(&mut errors, Field::Password, password, MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT);

        errors.into_result(|| Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            confirm_password: Some(confirm_password.into()),
        }
    }

    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, Field::Name, &self.name);
        let email = required(&mut errors, Field::Email, &self.email);
        let password = required(&mut errors, Field::Password, &self.password);
        let confirm = required(&mut errors, Field::ConfirmPassword, &self.confirm_password);

        min_len(&mut errors, Field::Name, name, MIN_NAME_LEN, NAME_TOO_SHORT);
        email_format(&mut errors, Field::Email, email);
        min_len(&mut errors, Field::Password, password, MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT);
        min_len(&mut errors, Field::ConfirmPassword, confirm, MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT);

        // Object-level rule: runs alongside the field rules, skipped only when a field is absent
        let all_present = [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .all(|value| value.is_some());
        if all_present && password != confirm {
            errors.add(Field::ConfirmPassword, PASSWORDS_DO_NOT_MATCH);
        }

        errors.into_result(|| Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

fn required<'a>(errors: &mut ValidationErrors, field: Field, value: &'a Option<String>) -> &'a str {
    match value {
        Some(value) => value.as_str(),
        None => {
            errors.add(field, REQUIRED);
            ""
        }
    }
}

fn min_len(errors: &mut ValidationErrors, field: Field, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}

fn email_format(errors: &mut ValidationErrors, field: Field, value: &str) {
    if !is_valid_email(value) {
        errors.add(field, INVALID_EMAIL);
    }
}
