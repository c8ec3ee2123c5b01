use super::item::ItemKind;
use thiserror::Error;

/// Failure while computing a price. A failed price is never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("{0} price calculation overflowed")]
    Overflow(ItemKind),
}
