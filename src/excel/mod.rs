//! Spreadsheet input
//!
//! - Loading: any calamine-readable workbook → ordered [`Row`](crate::types::Row)s
//! - Sample: writes a demo employee workbook to try the converter on

mod loader;
mod sample;

pub use loader::{normalize_cell, rows_from_range, SheetData, SheetLoader};
pub use sample::{SampleWorkbook, SAMPLE_HEADERS, SAMPLE_SHEET};
