use super::error::PricingError;
use super::invoice::Invoice;
use super::item::{BillableItem, ItemKind};
use super::rates::is_simple_service;
use rust_decimal::Decimal;

/// Append-only, ordered record of every invoice issued in a session
#[derive(Debug, Default, Clone)]
pub struct BillingHistory {
    invoices: Vec<Invoice>,
}

impl BillingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invoice, numbering it after the last one
    pub fn add_invoice(&mut self, invoice: Invoice) -> &Invoice {
        let number = self.invoices.len() + 1;
        log::debug!(
            "Invoice #{} {}: {}",
            number,
            invoice.kind(),
            invoice.price()
        );
        self.invoices.push(invoice.with_number(number));
        &self.invoices[number - 1]
    }

    /// Price the item, then append its invoice. Nothing is appended on failure.
    pub fn record(&mut self, item: BillableItem) -> Result<&Invoice, PricingError> {
        let invoice = Invoice::new(item)?;
        Ok(self.add_invoice(invoice))
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Invoice> {
        self.invoices.iter()
    }

    /// Descriptions of every invoice in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = String> + '_ {
        self.invoices.iter().map(Invoice::describe)
    }

    pub fn total_billed(&self) -> Decimal {
        self.invoices.iter().map(Invoice::price).sum()
    }

    /// Group classes with fewer than ten participants
    pub fn count_simple_services(&self) -> usize {
        self.invoices
            .iter()
            .filter(|invoice| match invoice.item() {
                BillableItem::GroupClass(class) => is_simple_service(class.participants()),
                _ => false,
            })
            .count()
    }

    pub fn count_by_kind(&self, kind: ItemKind) -> usize {
        self.invoices.iter().filter(|i| i.kind() == kind).count()
    }

    pub fn total_by_kind(&self, kind: ItemKind) -> Decimal {
        self.invoices
            .iter()
            .filter(|i| i.kind() == kind)
            .map(Invoice::price)
            .sum()
    }
}
