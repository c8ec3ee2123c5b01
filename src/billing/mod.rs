pub mod error;
pub mod history;
pub mod invoice;
pub mod item;
pub mod rates;

// Flat public surface for domain types and functions.
pub use history::BillingHistory;
pub use invoice::Invoice;
pub use item::{BillableItem, ItemKind};
