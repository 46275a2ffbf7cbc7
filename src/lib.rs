//! Core library for the availability-merge command line application.
//!
//! The pipeline is linear: [`io::workbook`] converts `.xlsx` sheets into
//! CSV files, [`io::csv_read`] parses them into per-source availability rows,
//! [`merge`] folds every source into a date-unique table, and
//! [`io::csv_write`] persists it. [`pipeline`] strings the steps together from
//! a [`config::PipelineConfig`].

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod model;
pub mod pipeline;

pub use error::{Result, ToolError};
