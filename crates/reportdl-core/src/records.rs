//! Record source: reads pending records from a CSV spreadsheet.
//!
//! The sheet needs a header row. The id and primary URL columns are
//! required; without a secondary column no record gets a fallback URL.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::config::ColumnConfig;
use crate::task::Record;

/// Reads all records from the CSV file at `path`.
pub fn read_records(path: &Path, columns: &ColumnConfig) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_records_from(file, columns).with_context(|| format!("read records from {}", path.display()))
}

/// Reads records from any CSV source. Empty ids are skipped; for duplicate
/// ids the first row wins.
pub fn read_records_from<R: io::Read>(reader: R, columns: &ColumnConfig) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().context("read header row")?.clone();

    let id_idx = column_index(&headers, &columns.id)
        .with_context(|| format!("column '{}' is missing", columns.id))?;
    let primary_idx = column_index(&headers, &columns.primary)
        .with_context(|| format!("column '{}' is missing", columns.primary))?;
    let secondary_idx = column_index(&headers, &columns.secondary);
    if secondary_idx.is_none() {
        tracing::debug!(column = %columns.secondary, "no secondary URL column");
    }

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("row {}", line + 2))?;
        let id = row.get(id_idx).unwrap_or("").trim();
        if id.is_empty() {
            tracing::warn!(row = line + 2, "skipping row without id");
            continue;
        }
        if !seen.insert(id.to_string()) {
            tracing::warn!(id, "duplicate id, keeping first row");
            continue;
        }
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);
        records.push(Record::new(id, cell(Some(primary_idx)), cell(secondary_idx)));
    }
    Ok(records)
}

/// Drops records whose `{id}.pdf` already exists in `output_dir`, then keeps
/// at most `limit` of the rest.
pub fn pending(records: Vec<Record>, output_dir: &Path, limit: Option<usize>) -> Vec<Record> {
    let before = records.len();
    let mut out: Vec<Record> = records
        .into_iter()
        .filter(|r| !r.destination_in(output_dir).exists())
        .collect();
    let skipped = before - out.len();
    if skipped > 0 {
        tracing::info!(skipped, "records already downloaded");
    }
    if let Some(n) = limit {
        out.truncate(n);
    }
    out
}

/// Finds a header by name, ignoring surrounding whitespace and a UTF-8 BOM.
pub(crate) fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
}
