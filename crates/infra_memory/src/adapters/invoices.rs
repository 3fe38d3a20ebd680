//! In-memory invoice store
//!
//! [`InvoicePort::issue`] computes the next number for the current year and
//! inserts the invoice while holding the write lock, so concurrent issues get
//! distinct numbers. The invoice date plays no part in numbering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, InvoiceId, OperationMetadata, PortError,
    ProductId,
};
use domain_invoicing::{next_invoice_number_for_year, Invoice, InvoiceDraft, InvoicePort};

use crate::table::Table;

/// `InvoicePort` over an in-memory table
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<Table<InvoiceId, Invoice>>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryInvoiceStore {}

#[async_trait]
impl HealthCheckable for InMemoryInvoiceStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.invoices.read().await.len();
        HealthCheckResult::healthy("memory-invoices", count)
    }
}

#[async_trait]
impl InvoicePort for InMemoryInvoiceStore {
    #[instrument(skip(self, _metadata), fields(invoice_id = %id))]
    async fn get(
        &self,
        id: InvoiceId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError> {
        self.invoices
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn list(&self, _metadata: Option<OperationMetadata>) -> Result<Vec<Invoice>, PortError> {
        Ok(self.invoices.read().await.values().cloned().collect())
    }

    #[instrument(skip(self, invoice, metadata), fields(numero = %invoice.numero))]
    async fn create(
        &self,
        invoice: Invoice,
        metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError> {
        let mut table = self.invoices.write().await;
        if table.values().any(|existing| existing.numero == invoice.numero) {
            return Err(PortError::conflict(format!(
                "Invoice number {} already exists",
                invoice.numero
            )));
        }
        debug!(
            invoice_id = %invoice.id,
            reason = ?metadata.as_ref().and_then(|m| m.reason.as_deref()),
            "Creating invoice"
        );
        table.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    #[instrument(skip(self, draft, _metadata), fields(invoice_id = %id))]
    async fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError> {
        let mut table = self.invoices.write().await;
        let invoice = table
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Invoice", id))?;
        invoice.replace_content(draft);
        Ok(invoice.clone())
    }

    #[instrument(skip(self, _metadata), fields(invoice_id = %id))]
    async fn delete(&self, id: InvoiceId, _metadata: Option<OperationMetadata>) -> Result<(), PortError> {
        self.invoices
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    #[instrument(skip(self, draft, metadata), fields(date = %draft.date))]
    async fn issue(
        &self,
        draft: InvoiceDraft,
        metadata: Option<OperationMetadata>,
    ) -> Result<Invoice, PortError> {
        let mut table = self.invoices.write().await;
        let numero = next_invoice_number_for_year(
            table.values().map(|invoice| invoice.numero.as_str()),
            Local::now().year(),
        );
        let invoice = Invoice::from_draft(numero, draft);
        info!(
            invoice_id = %invoice.id,
            numero = %invoice.numero,
            initiated_by = ?metadata.as_ref().and_then(|m| m.initiated_by.as_deref()),
            "Issued invoice"
        );
        table.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn references_product(
        &self,
        product_id: ProductId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError> {
        Ok(self.invoices.read().await.values().any(|invoice| {
            invoice
                .lines
                .iter()
                .any(|line| line.product_id == Some(product_id))
        }))
    }
}
