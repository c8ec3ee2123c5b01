use super::error::PricingError;
use super::rates::{
    qualifies_for_group_discount, GROUP_CLASS_MINUTE_RATE, GROUP_DISCOUNT_FACTOR,
    PERSONAL_TRAINING_HOURLY_RATE, SERVICE_TAX_FACTOR, SUPPLEMENT_TAX_FACTOR,
};
use crate::money::display_amount;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Kind of billable item, without its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Supplement,
    PersonalTraining,
    GroupClass,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [
        ItemKind::Supplement,
        ItemKind::PersonalTraining,
        ItemKind::GroupClass,
    ];
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Supplement => "Supplement",
            ItemKind::PersonalTraining => "Personal Training",
            ItemKind::GroupClass => "Group Class",
        };
        f.write_str(label)
    }
}

/// Anything that can be invoiced.
///
/// Price-affecting fields are private, an item cannot be repriced once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillableItem {
    Supplement(Supplement),
    PersonalTraining(PersonalTraining),
    GroupClass(GroupClass),
}

impl BillableItem {
    pub fn supplement(
        name: impl Into<String>,
        markup_percent: Decimal,
        list_price: Decimal,
    ) -> Self {
        BillableItem::Supplement(Supplement::new(name, markup_percent, list_price))
    }

    pub fn personal_training(activity: impl Into<String>, duration_hours: u32) -> Self {
        BillableItem::PersonalTraining(PersonalTraining::new(activity, duration_hours))
    }

    pub fn group_class(
        activity: impl Into<String>,
        participants: u32,
        duration_minutes: u32,
    ) -> Self {
        BillableItem::GroupClass(GroupClass::new(activity, participants, duration_minutes))
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            BillableItem::Supplement(_) => ItemKind::Supplement,
            BillableItem::PersonalTraining(_) => ItemKind::PersonalTraining,
            BillableItem::GroupClass(_) => ItemKind::GroupClass,
        }
    }

    /// Price before tax for sporting services, `None` for supplements
    pub fn base_price(&self) -> Option<Result<Decimal, PricingError>> {
        match self {
            BillableItem::Supplement(_) => None,
            BillableItem::PersonalTraining(training) => Some(training.base_price()),
            BillableItem::GroupClass(class) => Some(class.base_price()),
        }
    }

    /// Final price including tax (and markup or discount where they apply)
    pub fn final_price(&self) -> Result<Decimal, PricingError> {
        let kind = self.kind();
        let price = match self {
            BillableItem::Supplement(supplement) => supplement.final_price(),
            BillableItem::PersonalTraining(training) => training
                .base_price()
                .and_then(|base| service_final_price(kind, base)),
            BillableItem::GroupClass(class) => class
                .base_price()
                .and_then(|base| service_final_price(kind, base)),
        };
        if let Err(ref err) = price {
            log::warn!("Unable to price {:?}: {}", self, err);
        }
        price
    }

    /// Human readable line including the current final price
    pub fn describe(&self) -> Result<String, PricingError> {
        Ok(self.describe_at(self.final_price()?))
    }

    /// Human readable line using an already computed price
    pub(crate) fn describe_at(&self, price: Decimal) -> String {
        let price = display_amount(price);
        match self {
            BillableItem::Supplement(s) => {
                format!("Supplement: {}, Final Price: {}", s.name, price)
            }
            BillableItem::PersonalTraining(t) => format!(
                "Personal Training: {}, Duration: {} hours, Final Price: {}",
                t.activity, t.duration_hours, price
            ),
            BillableItem::GroupClass(c) => format!(
                "Group Class: {}, Participants: {}, Duration: {} minutes, Final Price: {}",
                c.activity, c.participants, c.duration_minutes, price
            ),
        }
    }

    /// Name of the supplement or activity of the service
    pub fn label(&self) -> &str {
        match self {
            BillableItem::Supplement(s) => &s.name,
            BillableItem::PersonalTraining(t) => &t.activity,
            BillableItem::GroupClass(c) => &c.activity,
        }
    }
}

/// Shared tax step for every sporting service, applied to its base price
pub fn service_final_price(kind: ItemKind, base_price: Decimal) -> Result<Decimal, PricingError> {
    base_price
        .checked_mul(SERVICE_TAX_FACTOR)
        .ok_or(PricingError::Overflow(kind))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplement {
    name: String,
    markup_percent: Decimal,
    list_price: Decimal,
}

impl Supplement {
    pub fn new(name: impl Into<String>, markup_percent: Decimal, list_price: Decimal) -> Self {
        Self {
            name: name.into(),
            markup_percent,
            list_price,
        }
    }

    /// Markup on the list price, then 21% tax on the result
    pub fn final_price(&self) -> Result<Decimal, PricingError> {
        let overflow = PricingError::Overflow(ItemKind::Supplement);
        let profit = self
            .markup_percent
            .checked_div(dec!(100))
            .and_then(|rate| self.list_price.checked_mul(rate))
            .ok_or_else(|| overflow.clone())?;
        let with_profit = self
            .list_price
            .checked_add(profit)
            .ok_or_else(|| overflow.clone())?;
        with_profit
            .checked_mul(SUPPLEMENT_TAX_FACTOR)
            .ok_or(overflow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalTraining {
    activity: String,
    duration_hours: u32,
}

impl PersonalTraining {
    pub fn new(activity: impl Into<String>, duration_hours: u32) -> Self {
        Self {
            activity: activity.into(),
            duration_hours,
        }
    }

    pub fn base_price(&self) -> Result<Decimal, PricingError> {
        Decimal::from(self.duration_hours)
            .checked_mul(PERSONAL_TRAINING_HOURLY_RATE)
            .ok_or(PricingError::Overflow(ItemKind::PersonalTraining))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupClass {
    activity: String,
    participants: u32,
    duration_minutes: u32,
}

impl GroupClass {
    pub fn new(activity: impl Into<String>, participants: u32, duration_minutes: u32) -> Self {
        Self {
            activity: activity.into(),
            participants,
            duration_minutes,
        }
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    /// Per-minute rate, 20% off for classes over the discount threshold
    pub fn base_price(&self) -> Result<Decimal, PricingError> {
        let overflow = PricingError::Overflow(ItemKind::GroupClass);
        let base = Decimal::from(self.duration_minutes)
            .checked_mul(GROUP_CLASS_MINUTE_RATE)
            .ok_or_else(|| overflow.clone())?;
        if qualifies_for_group_discount(self.participants) {
            base.checked_mul(GROUP_DISCOUNT_FACTOR).ok_or(overflow)
        } else {
            Ok(base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplement_applies_markup_then_tax() {
        let item = BillableItem::supplement("Whey", dec!(10), dec!(100));
        assert_eq!(item.final_price().unwrap(), dec!(133.10));
    }

    #[test]
    fn supplement_formula_holds_for_fractional_inputs() {
        let (list, markup) = (dec!(49.99), dec!(12.5));
        let item = BillableItem::supplement("Creatine", markup, list);
        let expected = (list + list * markup / dec!(100)) * dec!(1.21);
        assert_eq!(item.final_price().unwrap(), expected);
    }

    #[test]
    fn supplement_with_zero_markup_is_only_taxed() {
        let item = BillableItem::supplement("Bar", dec!(0), dec!(50));
        assert_eq!(item.final_price().unwrap(), dec!(60.50));
    }

    #[test]
    fn supplement_has_no_base_price() {
        let item = BillableItem::supplement("Bar", dec!(0), dec!(50));
        assert!(item.base_price().is_none());
    }

    #[test]
    fn personal_training_three_hours() {
        let item = BillableItem::personal_training("Boxing", 3);
        assert_eq!(item.base_price().unwrap().unwrap(), dec!(6000));
        assert_eq!(item.final_price().unwrap(), dec!(6630.00));
    }

    #[test]
    fn group_class_below_threshold_not_discounted() {
        let item = BillableItem::group_class("Yoga", 5, 60);
        assert_eq!(item.base_price().unwrap().unwrap(), dec!(4800));
        assert_eq!(item.final_price().unwrap(), dec!(5304.00));
    }

    #[test]
    fn group_class_above_threshold_discounted() {
        let item = BillableItem::group_class("Spinning", 15, 60);
        assert_eq!(item.base_price().unwrap().unwrap(), dec!(3840));
        assert_eq!(item.final_price().unwrap(), dec!(4243.20));
    }

    #[test]
    fn group_class_of_exactly_ten_not_discounted() {
        let item = BillableItem::group_class("Pilates", 10, 60);
        assert_eq!(item.base_price().unwrap().unwrap(), dec!(4800));
        assert_eq!(item.final_price().unwrap(), dec!(5304.00));
    }

    #[test]
    fn group_class_of_eleven_discounted() {
        let item = BillableItem::group_class("Pilates", 11, 60);
        assert_eq!(item.base_price().unwrap().unwrap(), dec!(3840));
    }

    #[test]
    fn sporting_services_share_half_tax() {
        let items = [
            BillableItem::personal_training("Running", 1),
            BillableItem::personal_training("Running", 0),
            BillableItem::group_class("Zumba", 3, 45),
            BillableItem::group_class("Zumba", 30, 90),
        ];
        for item in items {
            let base = item.base_price().unwrap().unwrap();
            assert_eq!(item.final_price().unwrap(), base * dec!(1.105));
        }
    }

    #[test]
    fn describe_formats_each_kind() {
        assert_eq!(
            BillableItem::supplement("Whey", dec!(10), dec!(100))
                .describe()
                .unwrap(),
            "Supplement: Whey, Final Price: $133.10"
        );
        assert_eq!(
            BillableItem::personal_training("Boxing", 3).describe().unwrap(),
            "Personal Training: Boxing, Duration: 3 hours, Final Price: $6630.00"
        );
        assert_eq!(
            BillableItem::group_class("Spinning", 15, 60).describe().unwrap(),
            "Group Class: Spinning, Participants: 15, Duration: 60 minutes, Final Price: $4243.20"
        );
    }

    #[test]
    fn describe_rounds_for_display_only() {
        let item = BillableItem::supplement("Gel", dec!(33.333), dec!(1));
        let price = item.final_price().unwrap();
        assert!(price.scale() > 2);
        assert!(item.describe().unwrap().ends_with("Final Price: $1.61"));
    }

    #[test]
    fn overflowing_supplement_is_an_error() {
        let item = BillableItem::supplement("Gold", dec!(100), Decimal::MAX);
        assert_eq!(
            item.final_price(),
            Err(PricingError::Overflow(ItemKind::Supplement))
        );
        assert!(item.describe().is_err());
    }

    #[test]
    fn kinds_and_labels() {
        assert_eq!(
            BillableItem::supplement("Whey", dec!(1), dec!(1)).kind(),
            ItemKind::Supplement
        );
        assert_eq!(BillableItem::personal_training("Boxing", 1).label(), "Boxing");
        assert_eq!(ItemKind::GroupClass.to_string(), "Group Class");
    }
}
