//! Batch item input, read from JSON or CSV

use crate::billing::{BillableItem, ItemKind};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("row {row}: unknown item kind '{kind}'")]
    UnknownKind { row: usize, kind: String },
    #[error("row {row}: {kind} requires '{field}'")]
    MissingField {
        row: usize,
        kind: ItemKind,
        field: &'static str,
    },
    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// One billable item as written in a JSON batch file
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemInput {
    Supplement {
        name: String,
        /// Markup over list price, in percent (10 = 10%)
        #[serde(with = "rust_decimal::serde::arbitrary_precision")]
        #[schemars(with = "f64")]
        markup_percent: Decimal,
        #[serde(with = "rust_decimal::serde::arbitrary_precision")]
        #[schemars(with = "f64")]
        list_price: Decimal,
    },
    PersonalTraining {
        activity: String,
        duration_hours: u32,
    },
    GroupClass {
        activity: String,
        participants: u32,
        duration_minutes: u32,
    },
}

impl From<ItemInput> for BillableItem {
    fn from(input: ItemInput) -> Self {
        match input {
            ItemInput::Supplement {
                name,
                markup_percent,
                list_price,
            } => BillableItem::supplement(name, markup_percent, list_price),
            ItemInput::PersonalTraining {
                activity,
                duration_hours,
            } => BillableItem::personal_training(activity, duration_hours),
            ItemInput::GroupClass {
                activity,
                participants,
                duration_minutes,
            } => BillableItem::group_class(activity, participants, duration_minutes),
        }
    }
}

/// Flat CSV row. Columns that do not apply to the row's kind are left empty.
///
/// Supplements use `name`, sporting services use `activity`.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvItemRow {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub markup_percent: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub participants: Option<u32>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

pub const CSV_COLUMNS: &[&str] = &[
    "kind",
    "name",
    "activity",
    "markup_percent",
    "list_price",
    "duration_hours",
    "participants",
    "duration_minutes",
];

impl CsvItemRow {
    /// Convert to an item, `row` is the 1-based data row used in errors
    pub fn into_item(self, row: usize) -> Result<BillableItem, InputError> {
        let kind = parse_kind(&self.kind).ok_or_else(|| InputError::UnknownKind {
            row,
            kind: self.kind.clone(),
        })?;
        let missing = |field| InputError::MissingField { row, kind, field };

        let item = match kind {
            ItemKind::Supplement => BillableItem::supplement(
                self.name.ok_or_else(|| missing("name"))?,
                self.markup_percent.ok_or_else(|| missing("markup_percent"))?,
                self.list_price.ok_or_else(|| missing("list_price"))?,
            ),
            ItemKind::PersonalTraining => BillableItem::personal_training(
                self.activity.ok_or_else(|| missing("activity"))?,
                self.duration_hours.ok_or_else(|| missing("duration_hours"))?,
            ),
            ItemKind::GroupClass => BillableItem::group_class(
                self.activity.ok_or_else(|| missing("activity"))?,
                self.participants.ok_or_else(|| missing("participants"))?,
                self.duration_minutes
                    .ok_or_else(|| missing("duration_minutes"))?,
            ),
        };
        Ok(item)
    }
}

fn parse_kind(kind: &str) -> Option<ItemKind> {
    match kind.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
        "supplement" => Some(ItemKind::Supplement),
        "personal_training" => Some(ItemKind::PersonalTraining),
        "group_class" => Some(ItemKind::GroupClass),
        _ => None,
    }
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<BillableItem>, InputError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut items = Vec::new();
    for (index, result) in rdr.deserialize::<CsvItemRow>().enumerate() {
        let row = result?;
        items.push(row.into_item(index + 1)?);
    }
    log::info!("Read {} csv records", items.len());
    Ok(items)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<BillableItem>, InputError> {
    let inputs: Vec<ItemInput> = serde_json::from_reader(reader)?;
    log::info!("Read {} json records", inputs.len());
    Ok(inputs.into_iter().map(BillableItem::from).collect())
}
