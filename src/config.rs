use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ToolError};

/// Default directory holding the source workbooks.
pub const DEFAULT_WORKBOOK_DIR: &str = "files";
/// Default directory receiving one CSV per workbook sheet.
pub const DEFAULT_CSV_DIR: &str = "csvFiles";
/// Default path of the merged output table.
pub const DEFAULT_OUTPUT_PATH: &str = "mergedData.csv";

/// Locations used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory scanned for `.xlsx` workbooks.
    pub workbook_dir: PathBuf,
    /// Directory the converter writes to and the merge reads from.
    pub csv_dir: PathBuf,
    /// Merged CSV written at the end of the pipeline.
    pub output_path: PathBuf,
    /// Create `csv_dir` before converting instead of requiring it to exist.
    pub create_csv_dir: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workbook_dir: PathBuf::from(DEFAULT_WORKBOOK_DIR),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            create_csv_dir: false,
        }
    }
}

impl PipelineConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Checks the paths needed to convert workbooks, creating the CSV
    /// directory when `create_csv_dir` is set.
    pub fn validate_for_conversion(&self) -> Result<()> {
        require_non_empty("workbook_dir", &self.workbook_dir)?;
        require_non_empty("csv_dir", &self.csv_dir)?;
        if !self.workbook_dir.is_dir() {
            return Err(ToolError::MissingDirectory(self.workbook_dir.clone()));
        }
        if !self.csv_dir.is_dir() {
            if !self.create_csv_dir {
                return Err(ToolError::MissingDirectory(self.csv_dir.clone()));
            }
            fs::create_dir_all(&self.csv_dir)?;
        }
        Ok(())
    }

    /// Checks the paths needed to merge the CSV directory into the output.
    pub fn validate_for_merge(&self) -> Result<()> {
        require_non_empty("csv_dir", &self.csv_dir)?;
        require_non_empty("output_path", &self.output_path)?;
        if !self.csv_dir.is_dir() {
            return Err(ToolError::MissingDirectory(self.csv_dir.clone()));
        }
        if self.output_path.is_dir() || self.output_path.file_name().is_none() {
            return Err(ToolError::InvalidConfig(format!(
                "output_path '{}' must name a file",
                self.output_path.display()
            )));
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ToolError::InvalidConfig(format!("{field} must not be empty")));
    }
    Ok(())
}
