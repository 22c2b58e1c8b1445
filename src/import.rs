//! CSV to JSON conversion for `series-gal import-csv`.
//!
//! Artwork lists are usually kept in a spreadsheet. The converter reads a CSV
//! export whose header row names the record fields and writes the JSON array
//! the gallery loads:
//!
//! ```text
//! title,series,year,subcategories,order
//! Dawn,Sky Studies,2021,"landscape, oil",1
//! ```
//!
//! becomes
//!
//! ```json
//! [{ "title": "Dawn", "series": "Sky Studies", "year": "2021",
//!    "subcategories": "landscape, oil", "order": "1" }]
//! ```
//!
//! Every cell is written as a trimmed string; the loader's lenient field
//! parsing turns `"1"` back into an order. Rows shorter than the header get
//! `null` for the missing columns. Cells beyond the header are dropped.

use crate::artwork::LoadError;
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Parse CSV with a header row into one JSON object per data row.
pub fn csv_records<R: Read>(reader: R) -> Result<Vec<Map<String, Value>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let cell = row.get(i).map_or(Value::Null, |v| Value::String(v.to_string()));
                (key.to_string(), cell)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Convert `csv_path` into a pretty-printed JSON array at `out_path`.
///
/// Parent directories of `out_path` are created. Returns the record count.
pub fn import_csv(csv_path: &Path, out_path: &Path) -> Result<usize, LoadError> {
    let records = csv_records(fs::File::open(csv_path)?)?;
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(out_path, json)?;
    tracing::debug!(
        from = %csv_path.display(),
        to = %out_path.display(),
        records = records.len(),
        "converted CSV"
    );
    Ok(records.len())
}
