//! Database models shared across the customer repository.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod customer;
