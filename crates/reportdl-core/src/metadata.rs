//! Status sink: merges `(id, status)` results into a CSV metadata file.
//!
//! Existing rows keep their other columns; a matching id gets its status
//! cell replaced, unknown ids are appended (sorted). The file is written to
//! a `.part` sibling first and renamed into place.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ColumnConfig;
use crate::records::column_index;
use crate::task::TaskStatus;

/// In-memory CSV table: header plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Writes `results` into the metadata file at `path`, creating it if needed.
/// Returns the number of rows updated or appended.
pub fn write_statuses(
    path: &Path,
    columns: &ColumnConfig,
    results: &HashMap<String, TaskStatus>,
) -> Result<usize> {
    let table = if path.exists() {
        read_table(path)?
    } else {
        Table {
            headers: vec![columns.id.clone(), columns.status.clone()],
            rows: Vec::new(),
        }
    };
    let (table, touched) = merge(table, columns, results)
        .with_context(|| format!("update {}", path.display()))?;
    write_table(path, &table)?;
    tracing::info!(path = %path.display(), rows = touched, "metadata updated");
    Ok(touched)
}

fn read_table(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = rdr
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for row in rdr.records() {
        let row = row.with_context(|| format!("read {}", path.display()))?;
        rows.push(row.iter().map(str::to_string).collect());
    }
    Ok(Table { headers, rows })
}

fn merge(
    mut table: Table,
    columns: &ColumnConfig,
    results: &HashMap<String, TaskStatus>,
) -> Result<(Table, usize)> {
    let header_record = csv::StringRecord::from(table.headers.clone());
    let (Some(id_idx), Some(status_idx)) = (
        column_index(&header_record, &columns.id),
        column_index(&header_record, &columns.status),
    ) else {
        anyhow::bail!(
            "columns '{}' and '{}' are required in the metadata file",
            columns.id,
            columns.status
        );
    };

    let width = table.headers.len();
    let mut remaining: BTreeMap<&str, &TaskStatus> =
        results.iter().map(|(id, s)| (id.as_str(), s)).collect();
    let mut touched = 0;

    for row in &mut table.rows {
        if row.len() < width {
            row.resize(width, String::new());
        }
        let id = row[id_idx].trim().to_string();
        if let Some(status) = remaining.remove(id.as_str()) {
            row[status_idx] = status.to_string();
            touched += 1;
        }
    }

    for (id, status) in remaining {
        let mut row = vec![String::new(); width];
        row[id_idx] = id.to_string();
        row[status_idx] = status.to_string();
        table.rows.push(row);
        touched += 1;
    }

    Ok((table, touched))
}

fn write_table(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let tmp = part_path(path);
    {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

/// `metadata.csv` → `metadata.csv.part`.
fn part_path(path: &Path) -> PathBuf {
    let mut o = path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}
