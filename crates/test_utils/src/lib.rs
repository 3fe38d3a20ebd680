//! Shared test support for the facturation crates
//!
//! `fixtures` holds fixed demo values with known totals, `builders` assemble
//! invoices, lines, clients and products field by field, `generators` are
//! proptest strategies over realistic invoice inputs, and `assertions` check
//! decimal and totals invariants with readable failure messages.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
