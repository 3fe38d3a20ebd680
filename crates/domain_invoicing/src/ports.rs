//! Invoicing Domain Ports
//!
//! Storage interface for invoices. Besides plain CRUD, [`InvoicePort::issue`]
//! allocates the next invoice number and stores the invoice as one step, so
//! two concurrent callers can never receive the same number.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, InvoiceId, OperationMetadata, PortError, ProductId};

use crate::invoice::{Invoice, InvoiceDraft};

/// Storage port for invoices
#[async_trait]
pub trait InvoicePort: DomainPort + HealthCheckable {
    async fn get(&self, id: InvoiceId, metadata: Option<OperationMetadata>)
        -> Result<Invoice, PortError>;

    /// Lists invoices in insertion order
    async fn list(&self, metadata: Option<OperationMetadata>) -> Result<Vec<Invoice>, PortError>;

    /// Stores an invoice that already carries its number
    ///
    /// Returns `PortError::Conflict` when the number is already taken.
    async fn create(
        &self,
        invoice: Invoice,
        metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError>;

    /// Replaces the content of an invoice; its number is kept
    async fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError>;

    async fn delete(&self, id: InvoiceId, metadata: Option<OperationMetadata>)
        -> Result<(), PortError>;

    /// Allocates the next number for the current year and stores the invoice
    ///
    /// Allocation and insertion are serialized against other calls.
    async fn issue(
        &self,
        draft: InvoiceDraft,
        metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError>;

    /// Returns true when any invoice line references the product
    async fn references_product(
        &self,
        product_id: ProductId,
        metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError>;
}
