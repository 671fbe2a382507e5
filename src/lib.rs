//! RowPDF - spreadsheet rows to individual PDF records
//!
//! This library reads a sheet from a spreadsheet, maps each row's
//! column/value pairs into a bordered two-column table, and writes one
//! paginated PDF per row with a deterministic filename.
//!
//! # Features
//!
//! - Any calamine-readable workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
//! - Typed cells (text, number, date, boolean, empty) with explicit display rules
//! - `{prefix}_{index:03}.pdf` filenames, one per source row
//! - Failure isolation: a row that cannot be rendered is reported, the batch continues
//! - YAML render configuration (page size, margins, fonts, colors)
//!
//! # Example
//!
//! ```no_run
//! use royalbit_rowpdf::Converter;
//!
//! let converter = Converter::new("sample_data.xlsx", "employee_pdfs");
//! println!("Sheets: {:?}", converter.list_sheets()?);
//!
//! let summary = converter.convert(None, "employee")?;
//! println!("{} of {} rows converted", summary.succeeded, summary.total);
//! # Ok::<(), royalbit_rowpdf::error::ConvertError>(())
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod excel;
pub mod pdf;
pub mod types;

// Re-export commonly used types
pub use config::RenderConfig;
pub use convert::{convert_rows, Converter};
pub use error::{ConvertError, ConvertResult};
pub use excel::SheetLoader;
pub use pdf::{RowRenderError, RowRenderer};
pub use types::{CellValue, ConversionResult, ConversionSummary, Row};
