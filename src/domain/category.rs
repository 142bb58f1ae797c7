use serde::{Deserialize, Serialize};

use crate::domain::types::CategoryId;

/// Category referenced (never owned) by customers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerCategory {
    pub id: CategoryId,
    pub code: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomerCategory {
    pub code: String,
    pub description: String,
}

impl NewCustomerCategory {
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into().trim().to_string(),
            description: description.into().trim().to_string(),
        }
    }
}
