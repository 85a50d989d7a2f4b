//! Customer operations

mod list;
mod types;

use async_trait::async_trait;
use customer_portal_validation::NewContact;

use crate::error::Result;
use crate::fetch::ApiClient;

pub use list::CustomerList;
pub use types::Customer;

/// The customer endpoints, as seen by the screens
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// Fetch the full collection
    async fn list(&self) -> Result<Vec<Customer>>;

    /// Create a customer and return the stored record
    async fn create(&self, contact: &NewContact) -> Result<Customer>;

    /// Delete the customer with `id`
    async fn delete(&self, id: &str) -> Result<()>;
}

/// [`CustomerApi`] over HTTP
#[derive(Clone)]
pub struct CustomerClient {
    api: ApiClient,
}

impl CustomerClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CustomerApi for CustomerClient {
    async fn list(&self) -> Result<Vec<Customer>> {
        self.api.get("/customers").execute().await
    }

    async fn create(&self, contact: &NewContact) -> Result<Customer> {
        self.api.post("/customer").json(contact)?.execute().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete("/customer").query("id", id).execute_empty().await
    }
}
