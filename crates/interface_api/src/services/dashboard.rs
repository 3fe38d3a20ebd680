//! Dashboard service

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use core_kernel::{format_amount, Currency, Money};
use domain_catalog::{ClientPort, ProductPort};
use domain_invoicing::InvoicePort;

use crate::dto::dashboard::DashboardResponse;
use crate::dto::invoice::InvoiceSummary;
use crate::error::ApiError;

const RECENT_INVOICES: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    clients: Arc<dyn ClientPort>,
    products: Arc<dyn ProductPort>,
    invoices: Arc<dyn InvoicePort>,
}

impl DashboardService {
    pub fn new(
        clients: Arc<dyn ClientPort>,
        products: Arc<dyn ProductPort>,
        invoices: Arc<dyn InvoicePort>,
    ) -> Self {
        Self {
            clients,
            products,
            invoices,
        }
    }

    pub async fn summary(&self) -> Result<DashboardResponse, ApiError> {
        let clients = self.clients.list(None).await?;
        let products = self.products.list(None).await?;
        let mut invoices = self.invoices.list(None).await?;

        let names: HashMap<_, _> = clients.iter().map(|c| (c.id, c.nom.clone())).collect();
        let chiffre_affaires: Decimal = invoices.iter().map(|i| i.totals.total_ttc).sum();
        let mut par_devise: Vec<Money> = Vec::new();
        for invoice in &invoices {
            let total = Money::new(invoice.totals.total_ttc, invoice.devise);
            match par_devise.iter_mut().find(|m| m.currency() == invoice.devise) {
                Some(sum) => {
                    *sum = sum
                        .checked_add(&total)
                        .map_err(|e| ApiError::Internal(e.to_string()))?
                }
                None => par_devise.push(total),
            }
        }
        let invoice_count = invoices.len();

        // stable sort keeps insertion order among invoices of the same day
        invoices.sort_by_key(|i| Reverse(i.date));
        let recent_invoices = invoices
            .into_iter()
            .take(RECENT_INVOICES)
            .map(|invoice| InvoiceSummary {
                id: invoice.id,
                client: invoice.client_id.and_then(|id| names.get(&id).cloned()),
                total_ttc_formatted: format_amount(invoice.totals.total_ttc, invoice.devise),
                total_ttc: invoice.totals.total_ttc,
                date: invoice.date,
                numero: invoice.numero,
            })
            .collect();

        Ok(DashboardResponse {
            clients: clients.len(),
            products: products.len(),
            invoices: invoice_count,
            chiffre_affaires,
            chiffre_affaires_formatted: format_amount(chiffre_affaires, Currency::DT),
            par_devise_formatted: par_devise.iter().map(Money::format).collect(),
            par_devise,
            recent_invoices,
        })
    }
}
