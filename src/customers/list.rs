use crate::customers::Customer;

/// The ordered customers currently on screen. Not a cache: it is replaced
/// wholesale on load and only edited after the API confirmed a change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerList {
    items: Vec<Customer>,
}

impl CustomerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence. Later duplicates of an id are dropped.
    pub fn replace(&mut self, customers: Vec<Customer>) {
        self.items.clear();
        for customer in customers {
            self.push(customer);
        }
    }

    /// Append at the end; returns false if the id is already displayed
    pub fn push(&mut self, customer: Customer) -> bool {
        if self.contains(&customer.id) {
            tracing::warn!("customer {} is already displayed", customer.id);
            return false;
        }
        self.items.push(customer);
        true
    }

    /// Remove the entry with `id`, keeping the others in order
    pub fn remove(&mut self, id: &str) -> Option<Customer> {
        let index = self.items.iter().position(|c| c.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Customer> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Customer] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a CustomerList {
    type Item = &'a Customer;
    type IntoIter = std::slice::Iter<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
