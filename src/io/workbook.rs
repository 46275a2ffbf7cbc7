use std::fs;
use std::path::{Path, PathBuf};

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::io::csv_read::REQUIRED_COLUMNS;

/// File extension recognised as a workbook.
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Outcome of converting a directory of workbooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of workbooks that could be opened.
    pub workbooks: usize,
    /// CSV files written, one per converted sheet.
    pub written: Vec<PathBuf>,
    /// Workbooks that failed to open.
    pub skipped_workbooks: Vec<PathBuf>,
    /// Sheets (as `<workbook>_<sheet>`) that could not be read or written.
    pub skipped_sheets: Vec<String>,
}

/// Converts every workbook under `input_dir` into one CSV file per sheet in
/// `output_dir`.
///
/// A workbook that cannot be opened, or a sheet that cannot be read or
/// written, is logged and skipped. Only failures to list `input_dir` or a
/// missing `output_dir` are returned as errors.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input_dir.display(), output = %output_dir.display())
)]
pub fn convert_directory(input_dir: &Path, output_dir: &Path) -> Result<ConversionReport> {
    if !output_dir.is_dir() {
        return Err(ToolError::MissingDirectory(output_dir.to_path_buf()));
    }

    let mut report = ConversionReport::default();
    for path in workbook_paths(input_dir)? {
        let mut workbook: Xlsx<_> = match open_workbook(&path) {
            Ok(workbook) => workbook,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable workbook");
                report.skipped_workbooks.push(path);
                continue;
            }
        };
        report.workbooks += 1;
        convert_sheets(&mut workbook, &path, output_dir, &mut report);
    }

    info!(
        workbooks = report.workbooks,
        csv_files = report.written.len(),
        skipped = report.skipped_workbooks.len() + report.skipped_sheets.len(),
        "converted workbooks"
    );
    Ok(report)
}

/// Converts a single workbook, returning the CSV files written for it.
/// Unlike [`convert_directory`], a workbook that fails to open is an error.
pub fn convert_workbook(path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut report = ConversionReport::default();
    convert_sheets(&mut workbook, path, output_dir, &mut report);
    Ok(report.written)
}

fn workbook_paths(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && is_workbook(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
}

fn convert_sheets<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    path: &Path,
    output_dir: &Path,
    report: &mut ConversionReport,
) {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    for sheet in workbook.sheet_names().to_vec() {
        let csv_name = format!("{stem}_{sheet}");
        let range = match workbook.worksheet_range(&sheet) {
            Some(Ok(range)) => range,
            Some(Err(err)) => {
                warn!(sheet = %csv_name, error = %err, "skipping unreadable sheet");
                report.skipped_sheets.push(csv_name);
                continue;
            }
            None => {
                warn!(sheet = %csv_name, "sheet listed but not found");
                report.skipped_sheets.push(csv_name);
                continue;
            }
        };

        let target = output_dir.join(format!("{csv_name}.csv"));
        match write_sheet(&range, &target) {
            Ok(()) => {
                debug!(path = %target.display(), rows = range.height(), "wrote sheet");
                report.written.push(target);
            }
            Err(err) => {
                warn!(path = %target.display(), error = %err, "skipping sheet that failed to write");
                report.skipped_sheets.push(csv_name);
            }
        }
    }
}

fn write_sheet(range: &Range<DataType>, target: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(target)?;
    // The range starts at the first non-empty cell; records are anchored at column A.
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    for row in range.rows() {
        let mut record: Vec<String> = std::iter::repeat_n(String::new(), leading)
            .chain(row.iter().map(cell_to_string))
            .collect();
        if record.len() < REQUIRED_COLUMNS {
            record.resize(REQUIRED_COLUMNS, String::new());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders a cell the way it is written into the intermediate CSV.
pub fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::DateTime(serial) => {
            excel_serial_to_string(*serial).unwrap_or_else(|| serial.to_string())
        }
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn excel_serial_to_string(serial: f64) -> Option<String> {
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let timestamp = epoch
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_seconds(seconds)?)?;
    if seconds == 0 {
        Some(timestamp.format("%Y-%m-%d").to_string())
    } else {
        Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
