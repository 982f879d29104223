//! Invoice list with payment-status filter

use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    format::matches_search,
    models::{Invoice, InvoicePayload, PaymentStatus, Record},
    repository::InvoicesRepository,
};

use super::{CrudScreen, Notification};

/// Sums over the invoices currently shown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceTotals {
    pub count: usize,
    pub total: Decimal,
    pub paid: Decimal,
    pub unpaid: Decimal,
}

pub struct InvoicesScreen {
    list: CrudScreen<InvoicesRepository>,
    search: String,
    pub status_filter: Option<PaymentStatus>,
}

impl InvoicesScreen {
    pub fn new(repository: InvoicesRepository) -> Self {
        Self {
            list: CrudScreen::new(repository),
            search: String::new(),
            status_filter: None,
        }
    }

    pub async fn load(&mut self) -> AppResult<()> {
        self.list.load().await
    }

    pub fn items(&self) -> &[Invoice] {
        self.list.items()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.list.notification()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn visible(&self) -> Vec<&Invoice> {
        self.list
            .items()
            .iter()
            .filter(|invoice| match &self.status_filter {
                Some(status) => invoice
                    .trang_thai_thanh_toan
                    .as_ref()
                    .is_some_and(|s| s.kind() == status.kind()),
                None => true,
            })
            .filter(|invoice| matches_search(&invoice.search_text(), &self.search))
            .collect()
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.visible()
            .into_iter()
            .fold(InvoiceTotals::default(), |mut acc, invoice| {
                acc.count += 1;
                acc.total += invoice.tong_tien;
                if invoice.is_paid() {
                    acc.paid += invoice.tong_tien;
                } else {
                    acc.unpaid += invoice.tong_tien;
                }
                acc
            })
    }

    pub async fn mark_paid(&mut self, invoice_id: i64) -> AppResult<Invoice> {
        tracing::info!("Marking invoice {} as paid", invoice_id);
        self.list
            .update(invoice_id, &InvoicePayload::status(PaymentStatus::Paid))
            .await
    }
}
