use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::RawLaptop;

/// Columns the input file must provide, in their original order.
pub const EXPECTED_COLUMNS: [&str; 11] = [
    "Brand",
    "Processor",
    "RAM (GB)",
    "Storage",
    "GPU",
    "Screen Size (inch)",
    "Resolution",
    "Battery Life (hours)",
    "Weight (kg)",
    "Operating System",
    "Price ($)",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load laptop listings from a CSV file.
///
/// Fails if the file cannot be opened, a required column is missing, or a
/// row does not match the expected types.
pub fn load_csv(path: &Path) -> Result<Vec<RawLaptop>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_laptops(file).with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the [`EXPECTED_COLUMNS`] in any order.
/// Extra columns are ignored.
pub fn read_laptops<R: Read>(input: R) -> Result<Vec<RawLaptop>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("CSV missing column(s): {}", missing.join(", "));
    }

    let mut laptops = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaptop>().enumerate() {
        let laptop = result.with_context(|| format!("CSV row {row_no}"))?;
        laptops.push(laptop);
    }

    log::debug!("read {} laptop rows", laptops.len());
    Ok(laptops)
}
