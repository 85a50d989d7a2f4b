//! Configuration options for the customer portal client

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Base address of the customer API when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Directory holding the persisted session when nothing else is configured
pub const DEFAULT_SESSION_DIR: &str = ".customer-portal";

pub const ENV_API_URL: &str = "CUSTOMER_PORTAL_API_URL";
pub const ENV_SESSION_DIR: &str = "CUSTOMER_PORTAL_SESSION_DIR";
pub const ENV_TIMEOUT_SECS: &str = "CUSTOMER_PORTAL_TIMEOUT_SECS";

/// Configuration options for the customer portal client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the customer API
    pub api_url: String,

    /// The request timeout; requests may hang forever when unset
    pub request_timeout: Option<Duration>,

    /// Whether the session survives the process (file storage) or not
    pub persist_session: bool,

    /// Where the session files live when `persist_session` is set
    pub session_dir: PathBuf,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            persist_session: false,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }
}

impl ClientOptions {
    /// Build options from `CUSTOMER_PORTAL_*` environment variables, falling
    /// back to defaults for anything unset. A session dir in the environment
    /// turns persistence on.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(url) = env::var(ENV_API_URL) {
            options = options.with_api_url(&url);
        }
        if let Ok(dir) = env::var(ENV_SESSION_DIR) {
            options = options.with_session_dir(dir).with_persist_session(true);
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| Error::config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS)))?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the API base URL
    pub fn with_api_url(mut self, value: &str) -> Self {
        self.api_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set whether to persist the session on disk
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the session directory
    pub fn with_session_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.session_dir = value.into();
        self
    }
}
