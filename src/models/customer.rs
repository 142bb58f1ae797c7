use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};
use crate::domain::types::{CategoryId, CustomerId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    pub customer_category_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub iban: &'a str,
    pub customer_category_id: Option<i32>,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(customer.id)?,
            name: customer.name,
            address: customer.address,
            email: customer.email,
            phone: customer.phone,
            iban: customer.iban,
            customer_category_id: customer
                .customer_category_id
                .map(CategoryId::new)
                .transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            address: customer.address.as_str(),
            email: customer.email.as_str(),
            phone: customer.phone.as_str(),
            iban: customer.iban.as_str(),
            customer_category_id: customer.customer_category_id.map(CategoryId::get),
        }
    }
}
