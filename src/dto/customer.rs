//! Wire shapes of the customer list endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters accepted by `/api/customers/list` and `/api/customers/export`.
///
/// Offsets and limits are decoded as signed integers so that negative values
/// reach validation and are rejected instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    /// Free-form text matched against name and email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    /// Sort key name; unknown values fall back to sorting by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "take must not be negative"))]
    pub take: Option<i64>,
}

impl CustomerListParams {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn sort_by(mut self, key: impl Into<String>, descending: bool) -> Self {
        self.sort_by = Some(key.into());
        self.descending = Some(descending);
        self
    }

    pub fn paginate(mut self, skip: i64, take: i64) -> Self {
        self.skip = Some(skip);
        self.take = Some(take);
        self
    }
}

/// Code and description of the category attached to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub code: String,
    pub description: String,
}

/// Read-only projection of a customer returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_category: Option<CategorySummary>,
}
