use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::merge::MergedTable;

/// Writes the merged table, header first, to `path`. An existing file is
/// truncated.
#[instrument(level = "debug", skip(table), fields(path = %path.display(), rows = table.len()))]
pub fn write_merged(path: &Path, table: &MergedTable) -> Result<()> {
    write_table(File::create(path)?, table)?;
    debug!("merged table written");
    Ok(())
}

/// Writes the merged table as CSV to any sink, quoting fields as needed.
pub fn write_table<W: Write>(sink: W, table: &MergedTable) -> Result<()> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(MergedTable::header())?;
    for row in table.rows() {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}
