use std::sync::Arc;

use customer_portal_validation::{ContactForm, ValidationErrors};

use crate::customers::{Customer, CustomerApi, CustomerList};

/// The protected customer list with its creation form
pub struct CustomerListScreen {
    api: Arc<dyn CustomerApi>,
    customers: CustomerList,
    form: ContactForm,
    errors: ValidationErrors,
}

impl CustomerListScreen {
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        Self {
            api,
            customers: CustomerList::new(),
            form: ContactForm::default(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn customers(&self) -> &CustomerList {
        &self.customers
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Load the full collection once, replacing whatever is displayed
    pub async fn mount(&mut self) {
        match self.api.list().await {
            Ok(customers) => self.customers.replace(customers),
            Err(err) => tracing::error!("Error fetching customers: {}", err),
        }
    }

    /// Validate and create a customer; the stored record goes to the end of
    /// the list and the form is cleared. Returns the created record.
    pub async fn submit(&mut self, form: ContactForm) -> Option<&Customer> {
        self.form = form;

        let contact = match self.form.validate() {
            Ok(contact) => contact,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };
        self.errors = ValidationErrors::new();

        match self.api.create(&contact).await {
            Ok(customer) => {
                let id = customer.id.clone();
                if !self.customers.push(customer) {
                    tracing::error!("Error creating customer: id {} is already displayed", id);
                    return None;
                }
                self.form = ContactForm::default();
                self.customers.get(&id)
            }
            Err(err) => {
                tracing::error!("Error creating customer: {}", err);
                None
            }
        }
    }

    /// Delete by id. The list only changes once the API confirmed.
    pub async fn delete(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.customers.remove(id);
                true
            }
            Err(err) => {
                tracing::error!("Error deleting customer: {}", err);
                false
            }
        }
    }
}
