use diesel::prelude::*;

use crate::domain::category::{
    CustomerCategory as DomainCustomerCategory, NewCustomerCategory as DomainNewCustomerCategory,
};
use crate::domain::types::{CategoryId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customer_categories)]
/// Diesel model for [`crate::domain::category::CustomerCategory`].
pub struct CustomerCategory {
    pub id: i32,
    pub code: String,
    pub description: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customer_categories)]
pub struct NewCustomerCategory<'a> {
    pub code: &'a str,
    pub description: &'a str,
}

impl TryFrom<CustomerCategory> for DomainCustomerCategory {
    type Error = TypeConstraintError;

    fn try_from(category: CustomerCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(category.id)?,
            code: category.code,
            description: category.description,
        })
    }
}

impl<'a> From<&'a DomainNewCustomerCategory> for NewCustomerCategory<'a> {
    fn from(category: &'a DomainNewCustomerCategory) -> Self {
        Self {
            code: category.code.as_str(),
            description: category.description.as_str(),
        }
    }
}
