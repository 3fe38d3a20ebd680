//! Invoice service

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{InvoiceId, OperationMetadata};
use domain_catalog::ClientPort;
use domain_invoicing::{
    next_invoice_number, CompanyProfile, Invoice, InvoiceDraft, InvoicePort, InvoicePreview,
};

use crate::dto::invoice::ComputeResponse;
use crate::error::ApiError;

/// Invoice lifecycle: numbering, saving, computing and previewing
#[derive(Clone)]
pub struct InvoiceService {
    invoices: Arc<dyn InvoicePort>,
    clients: Arc<dyn ClientPort>,
    company: CompanyProfile,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoicePort>,
        clients: Arc<dyn ClientPort>,
        company: CompanyProfile,
    ) -> Self {
        Self {
            invoices,
            clients,
            company,
        }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, ApiError> {
        Ok(self.invoices.list(None).await?)
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, ApiError> {
        Ok(self.invoices.get(id, None).await?)
    }

    /// Number the next invoice of the current year would receive
    ///
    /// Informational only; [`InvoiceService::issue`] allocates the number
    /// again when saving.
    pub async fn next_number(&self) -> Result<String, ApiError> {
        let invoices = self.invoices.list(None).await?;
        Ok(next_invoice_number(&invoices))
    }

    /// Saves a new invoice under the next number of its year
    #[instrument(skip(self, draft, metadata), fields(date = %draft.date))]
    pub async fn issue(
        &self,
        draft: InvoiceDraft,
        metadata: OperationMetadata,
    ) -> Result<Invoice, ApiError> {
        self.ensure_saveable(&draft, &metadata).await?;
        let invoice = self.invoices.issue(draft, Some(metadata)).await?;
        info!(numero = %invoice.numero, total_ttc = %invoice.totals.total_ttc, "Invoice saved");
        Ok(invoice)
    }

    /// Replaces the content of an invoice, keeping its number
    #[instrument(skip(self, draft, metadata))]
    pub async fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        metadata: OperationMetadata,
    ) -> Result<Invoice, ApiError> {
        self.invoices.get(id, Some(metadata.clone())).await?;
        self.ensure_saveable(&draft, &metadata).await?;
        Ok(self.invoices.update(id, draft, Some(metadata)).await?)
    }

    #[instrument(skip(self, metadata))]
    pub async fn delete(&self, id: InvoiceId, metadata: OperationMetadata) -> Result<(), ApiError> {
        self.invoices.delete(id, Some(metadata)).await?;
        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Totals, formatted amounts and amount in words of unsaved content
    pub fn compute(&self, draft: InvoiceDraft) -> Result<ComputeResponse, ApiError> {
        draft.check_amounts()?;
        Ok(ComputeResponse::from_invoice(Invoice::from_draft(String::new(), draft)))
    }

    /// Printable document of a saved invoice
    ///
    /// A client deleted since the invoice was saved shows as no client.
    pub async fn preview(&self, id: InvoiceId) -> Result<InvoicePreview, ApiError> {
        let invoice = self.invoices.get(id, None).await?;
        let client = match invoice.client_id {
            Some(client_id) => match self.clients.get(client_id, None).await {
                Ok(client) => Some(client),
                Err(e) if e.is_not_found() => None,
                Err(e) => return Err(e.into()),
            },
            None => None,
        };
        Ok(InvoicePreview::build(&invoice, client.as_ref(), &self.company))
    }

    /// Draft rules plus existence of the selected client
    async fn ensure_saveable(
        &self,
        draft: &InvoiceDraft,
        metadata: &OperationMetadata,
    ) -> Result<(), ApiError> {
        draft.check_amounts()?;
        Invoice::from_draft(String::new(), draft.clone()).validate_for_save()?;
        if let Some(client_id) = draft.client_id {
            match self.clients.get(client_id, Some(metadata.clone())).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    return Err(ApiError::validation(vec![format!(
                        "Unknown client: {}",
                        client_id
                    )]));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
