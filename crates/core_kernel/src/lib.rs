//! Core Kernel - Foundational types and utilities for the invoicing system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money and currency types with precise decimal arithmetic
//! - Locale-correct amount formatting
//! - Strongly-typed identifiers
//! - Port traits and errors for swappable storage adapters

pub mod money;
pub mod format;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate, SymbolPosition};
pub use format::{format_amount, format_numeral};
pub use identifiers::{
    ClientId, CategoryId, ProductId, InvoiceId, InvoiceLineId, UserId,
};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
    OperationMetadata,
};
