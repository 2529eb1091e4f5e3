//! Customers

/// Customer a sale is invoiced to.
///
/// Carat only carries the reference details an invoice prints; customer
/// management itself lives with the backing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Billing address
    pub address: Option<String>,
}

impl Customer {
    /// Creates a customer with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Customer {
            name: name.into(),
            phone: None,
            address: None,
        }
    }
}
