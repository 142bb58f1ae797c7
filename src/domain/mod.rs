//! Domain entities exposed by the customer directory service layer.

pub mod category;
pub mod customer;
pub mod types;
