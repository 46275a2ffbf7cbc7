use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument};

use crate::error::{Result, ToolError};
use crate::model::{Row, SourceId, SourceTable};

/// Number of positional columns every availability record must carry.
pub const REQUIRED_COLUMNS: usize = 5;

/// Reads every file in `dir` into a [`SourceTable`].
///
/// Each non-directory entry is parsed as an availability CSV and keyed by
/// its source identifier. The first file that fails to parse aborts the whole
/// read; no partial table is returned.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn read_directory(dir: &Path) -> Result<SourceTable> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut origins: BTreeMap<SourceId, PathBuf> = BTreeMap::new();
    let mut table = SourceTable::new();
    for path in paths {
        let Some(source_id) = source_identifier(&path) else {
            continue;
        };
        match origins.entry(source_id.clone()) {
            Entry::Occupied(existing) => {
                return Err(ToolError::DuplicateSource {
                    source_id,
                    first: existing.get().clone(),
                    second: path,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(path.clone());
            }
        }

        let rows = read_rows(&path)?;
        debug!(source = %source_id, rows = rows.len(), "parsed source");
        table.insert(source_id, rows);
    }

    info!(sources = table.len(), "read availability sources");
    Ok(table)
}

/// Derives the source identifier of a file: its name without the last
/// extension.
pub fn source_identifier(path: &Path) -> Option<SourceId> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Parses one availability CSV. There is no header row; every record is data.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row = row_from_record(&record).ok_or_else(|| ToolError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            expected: REQUIRED_COLUMNS,
            found: record.len(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Builds a row from the positional columns
/// `date, day of week, preferential, available, impossible`. Extra columns are
/// ignored; `None` is returned when fewer than five are present.
pub fn row_from_record(record: &StringRecord) -> Option<Row> {
    if record.len() < REQUIRED_COLUMNS {
        return None;
    }
    Some(Row::from_cells(
        record.get(0)?,
        record.get(1)?,
        record.get(2)?,
        record.get(3)?,
        record.get(4)?,
    ))
}
