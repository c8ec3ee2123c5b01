use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Standard tax factor applied to supplements (21%)
pub const SUPPLEMENT_TAX_FACTOR: Decimal = dec!(1.21);

/// Half of the standard tax rate, applied to every sporting service (10.5%)
pub const SERVICE_TAX_FACTOR: Decimal = dec!(1.105);

/// Personal training price per hour, before tax
pub const PERSONAL_TRAINING_HOURLY_RATE: Decimal = dec!(2000);

/// Group class price per minute, before tax and discount
pub const GROUP_CLASS_MINUTE_RATE: Decimal = dec!(80);

/// Multiplier for large group classes (20% off)
pub const GROUP_DISCOUNT_FACTOR: Decimal = dec!(0.8);

/// Group classes with strictly more participants than this are discounted
pub const GROUP_DISCOUNT_THRESHOLD: u32 = 10;

/// Group classes with strictly fewer participants than this count as simple services.
/// Exactly this many participants is neither discounted nor simple.
pub const SIMPLE_SERVICE_THRESHOLD: u32 = 10;

/// Whether a group class of this size gets the large group discount
pub fn qualifies_for_group_discount(participants: u32) -> bool {
    participants > GROUP_DISCOUNT_THRESHOLD
}

/// Whether a group class of this size counts as a simple service
pub fn is_simple_service(participants: u32) -> bool {
    participants < SIMPLE_SERVICE_THRESHOLD
}
