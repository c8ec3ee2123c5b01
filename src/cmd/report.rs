//! Report command - record a batch of items and print the billing history

use super::{read_items, InputFormat};
use crate::billing::{BillingHistory, Invoice, ItemKind};
use crate::money::{display_amount, plain_amount};
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// JSON or CSV file containing billable items ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format, guessed from the file extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Output as JSON instead of a formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output invoices as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the invoice table and CSV output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct InvoiceRow {
    #[tabled(rename = "#")]
    pub number: usize,

    #[tabled(rename = "Kind")]
    pub kind: String,

    #[tabled(rename = "Item")]
    pub item: String,

    #[tabled(rename = "Price")]
    pub price: String,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        InvoiceRow {
            number: invoice.number(),
            kind: invoice.kind().to_string(),
            item: invoice.item().label().to_string(),
            price: plain_amount(invoice.price()),
        }
    }
}

/// Report data for JSON output
#[derive(Debug, Serialize)]
struct ReportData {
    invoices: Vec<InvoiceJson>,
    invoice_count: usize,
    total_billed: String,
    simple_services: usize,
    by_kind: Vec<KindSummary>,
}

#[derive(Debug, Serialize)]
struct InvoiceJson {
    number: usize,
    kind: ItemKind,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_price: Option<String>,
    price: String,
}

#[derive(Debug, Serialize)]
struct KindSummary {
    kind: ItemKind,
    count: usize,
    total: String,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let items = read_items(&self.input, self.format)?;

        let mut history = BillingHistory::new();
        for item in items {
            history.record(item)?;
        }
        log::info!("Recorded {} invoices", history.len());

        if self.json {
            print_json(&history)
        } else if self.csv {
            write_csv(&history)
        } else {
            print_table(&history);
            Ok(())
        }
    }
}

fn print_table(history: &BillingHistory) {
    if history.is_empty() {
        println!("No services recorded.");
    } else {
        let rows: Vec<InvoiceRow> = history.iter().map(InvoiceRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
    println!();
    for kind in ItemKind::ALL {
        println!(
            "  {}: {} ({})",
            kind,
            history.count_by_kind(kind),
            display_amount(history.total_by_kind(kind))
        );
    }
    println!();
    println!("Total Billed: {}", display_amount(history.total_billed()));
    println!("Simple Services: {}", history.count_simple_services());
}

fn write_csv(history: &BillingHistory) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for invoice in history.iter() {
        wtr.serialize(InvoiceRow::from(invoice))?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_json(history: &BillingHistory) -> anyhow::Result<()> {
    let mut invoices = Vec::with_capacity(history.len());
    for invoice in history.iter() {
        let base_price = invoice.item().base_price().transpose()?;
        invoices.push(InvoiceJson {
            number: invoice.number(),
            kind: invoice.kind(),
            description: invoice.describe(),
            base_price: base_price.map(plain_amount),
            price: plain_amount(invoice.price()),
        });
    }

    let data = ReportData {
        invoices,
        invoice_count: history.len(),
        total_billed: plain_amount(history.total_billed()),
        simple_services: history.count_simple_services(),
        by_kind: ItemKind::ALL
            .iter()
            .map(|&kind| KindSummary {
                kind,
                count: history.count_by_kind(kind),
                total: plain_amount(history.total_by_kind(kind)),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
