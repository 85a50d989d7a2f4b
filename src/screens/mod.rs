//! Screen controllers
//!
//! Each screen owns its form state and validation errors and exposes what
//! should be rendered. Navigation is expressed by returning a [`Route`].

mod customers;
mod login;
mod register;
mod router;

pub use customers::CustomerListScreen;
pub use login::LoginScreen;
pub use register::{failure_message as register_failure_message, RegisterScreen, EMAIL_TAKEN_SERVER_MESSAGE};
pub use router::{Route, RouteGuard};

pub const LOGIN_FAILED: &str = "Erro ao realizar o login. Tente novamente.";
pub const EMAIL_ALREADY_REGISTERED: &str = "Este email já está cadastrado";
pub const REGISTER_FAILED: &str = "Erro ao realizar o registro. Tente novamente.";
