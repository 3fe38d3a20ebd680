//! Request handlers, one module per resource

pub mod health;
pub mod auth;
pub mod clients;
pub mod categories;
pub mod products;
pub mod invoices;
pub mod dashboard;
pub mod format;
