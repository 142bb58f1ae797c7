use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CustomerId};

/// Customer record as stored in the directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    /// Reference to a category; it may not resolve to an existing row.
    pub customer_category_id: Option<CategoryId>,
}

impl Customer {
    /// Returns `true` when the lower-cased `needle` occurs in the name or the
    /// email. The caller is expected to lower-case the needle once.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    pub customer_category_id: Option<CategoryId>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        iban: impl Into<String>,
        customer_category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            address: address.into().trim().to_string(),
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            iban: iban.into().trim().to_string(),
            customer_category_id,
        }
    }
}
