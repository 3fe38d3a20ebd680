//! Application services
//!
//! Rules that need more than one port live here: a category or product in
//! use cannot be deleted, a saved invoice must reference an existing client,
//! and invoice numbers are issued by the invoice store.

pub mod catalog;
pub mod invoices;
pub mod dashboard;

pub use catalog::CatalogService;
pub use invoices::InvoiceService;
pub use dashboard::DashboardService;
