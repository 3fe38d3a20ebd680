//! Request and response bodies
//!
//! Catalog and invoice bodies reuse the domain types directly; the types
//! here cover what has no domain counterpart.

pub mod auth;
pub mod catalog;
pub mod invoice;
pub mod format;
pub mod dashboard;
