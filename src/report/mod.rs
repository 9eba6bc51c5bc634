//! Report renderers for the collected package records.
//!
//! - [`xlsx`] — single-sheet Office Open XML workbook, one row per package.

pub mod xlsx;

/// Default report file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "dependencies.xlsx";

/// Column titles of the report, in order.
pub const HEADER: [&str; 4] = ["Package Name", "Version", "License", "Project URL"];
