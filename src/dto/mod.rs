//! DTO modules shared by the HTTP API and its clients.

pub mod customer;
