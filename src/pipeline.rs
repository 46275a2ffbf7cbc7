use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::io::workbook::{self, ConversionReport};
use crate::io::{csv_read, csv_write};
use crate::merge::{MergedTable, merge_sources};

/// Counts gathered over a pipeline run, together with the merged table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub workbooks: usize,
    pub csv_files: usize,
    pub sources: usize,
    pub table: MergedTable,
}

/// Runs the whole pipeline: workbooks → CSV files → merged table on disk.
///
/// Conversion problems are logged and do not stop the run. Failures while
/// reading the CSV directory or writing the output are returned.
#[instrument(
    level = "info",
    skip_all,
    fields(
        workbooks = %config.workbook_dir.display(),
        csv_dir = %config.csv_dir.display(),
        output = %config.output_path.display()
    )
)]
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let report = match convert(config) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "workbook conversion failed; merging existing CSV files");
            ConversionReport::default()
        }
    };

    let mut summary = merge(config)?;
    summary.workbooks = report.workbooks;
    summary.csv_files = report.written.len();
    Ok(summary)
}

/// Converts the configured workbook directory into per-sheet CSV files.
pub fn convert(config: &PipelineConfig) -> Result<ConversionReport> {
    config.validate_for_conversion()?;
    workbook::convert_directory(&config.workbook_dir, &config.csv_dir)
}

/// Reads the configured CSV directory, merges it, and writes the output.
#[instrument(level = "debug", skip_all)]
pub fn merge(config: &PipelineConfig) -> Result<PipelineSummary> {
    config.validate_for_merge()?;
    let sources = csv_read::read_directory(&config.csv_dir)?;
    let table = merge_sources(&sources);
    info!(sources = sources.len(), dates = table.len(), "merged availability");
    csv_write::write_merged(&config.output_path, &table)?;

    Ok(PipelineSummary {
        sources: sources.len(),
        table,
        ..PipelineSummary::default()
    })
}
