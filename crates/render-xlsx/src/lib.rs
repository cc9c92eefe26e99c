//! XLSX output.
//!
//! A workbook is described as a list of [`SheetSpec`]s and written in one
//! go by [`WorkbookSpec::build`]. Sheets are right-to-left by default, with
//! a styled and frozen header row, zebra data rows and column widths sized
//! to their content.

mod sheet;
mod workbook;

pub use sheet::{CellValue, SheetSpec, MAX_COLUMN_WIDTH};
pub use workbook::{ERROR_SHEET_NAME, WorkbookSpec, emergency_workbook};
