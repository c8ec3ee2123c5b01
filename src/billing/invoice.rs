use super::error::PricingError;
use super::item::{BillableItem, ItemKind};
use rust_decimal::Decimal;

/// A billable item paired with the price it had when invoiced.
///
/// The price is computed once in [`Invoice::new`] and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    number: usize,
    item: BillableItem,
    price: Decimal,
}

impl Invoice {
    pub fn new(item: BillableItem) -> Result<Self, PricingError> {
        let price = item.final_price()?;
        Ok(Self {
            number: 0,
            item,
            price,
        })
    }

    /// 1-based position in the owning history, 0 until appended
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn item(&self) -> &BillableItem {
        &self.item
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Description of the item at its invoiced price
    pub fn describe(&self) -> String {
        self.item.describe_at(self.price)
    }

    pub(super) fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_is_computed_at_construction() {
        let invoice = Invoice::new(BillableItem::personal_training("Boxing", 3)).unwrap();
        assert_eq!(invoice.price(), dec!(6630));
        assert_eq!(invoice.kind(), ItemKind::PersonalTraining);
        assert_eq!(invoice.number(), 0);
    }

    #[test]
    fn price_snapshot_is_stable() {
        let invoice = Invoice::new(BillableItem::group_class("Yoga", 15, 60)).unwrap();
        let snapshot = invoice.price();

        // a differently priced item of the same activity has no effect on the invoice
        let repriced = BillableItem::group_class("Yoga", 5, 120);
        assert_ne!(repriced.final_price().unwrap(), snapshot);

        let copy = invoice.clone();
        assert_eq!(invoice.price(), snapshot);
        assert_eq!(copy.price(), snapshot);
        assert_eq!(invoice.describe(), copy.describe());
    }

    #[test]
    fn describe_uses_invoiced_price() {
        let invoice = Invoice::new(BillableItem::supplement("Whey", dec!(10), dec!(100))).unwrap();
        assert_eq!(invoice.describe(), "Supplement: Whey, Final Price: $133.10");
    }

    #[test]
    fn overflowing_item_cannot_be_invoiced() {
        let result = Invoice::new(BillableItem::supplement("Gold", dec!(100), Decimal::MAX));
        assert_eq!(result, Err(PricingError::Overflow(ItemKind::Supplement)));
    }
}
