pub mod report;
pub mod schema;
pub mod session;

use crate::billing::BillableItem;
use crate::input;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Batch input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Guess from the file extension, JSON unless it ends in `.csv`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

/// Read billable items from a file (or stdin with "-")
pub fn read_items(path: &Path, format: Option<InputFormat>) -> anyhow::Result<Vec<BillableItem>> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    if path.as_os_str() == "-" {
        read_from_stdin(format)
    } else {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Unable to open {}: {}", path.display(), e))?;
        parse_items(BufReader::new(file), format)
    }
}

fn read_from_stdin(format: InputFormat) -> anyhow::Result<Vec<BillableItem>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    parse_items(io::Cursor::new(buffer), format)
}

fn parse_items<R: Read>(reader: R, format: InputFormat) -> anyhow::Result<Vec<BillableItem>> {
    let items = match format {
        InputFormat::Json => input::read_json(reader)?,
        InputFormat::Csv => input::read_csv(reader)?,
    };
    Ok(items)
}
