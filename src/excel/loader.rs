//! Sheet loader - spreadsheet (.xlsx/.xls/.ods) → rows

use crate::error::{ConvertError, ConvertResult};
use crate::types::{CellValue, Row};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Largest integer an f64 holds exactly
const MAX_EXACT_INT: u64 = 1 << 53;

/// Rows of one sheet, plus what was resolved while loading it
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Reads sheets from a spreadsheet file into [`Row`]s
pub struct SheetLoader {
    path: PathBuf,
}

impl SheetLoader {
    /// Create a loader for the workbook at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in the workbook's declared order
    pub fn list_sheets(&self) -> ConvertResult<Vec<String>> {
        let workbook = self.open()?;
        Ok(workbook.sheet_names())
    }

    /// Load rows from `sheet_name`, or from the first sheet when `None`
    pub fn load_rows(&self, sheet_name: Option<&str>) -> ConvertResult<Vec<Row>> {
        Ok(self.load(sheet_name)?.rows)
    }

    /// Load a sheet with its resolved name and headers
    pub fn load(&self, sheet_name: Option<&str>) -> ConvertResult<SheetData> {
        let mut workbook = self.open()?;
        let available = workbook.sheet_names();

        let name = match sheet_name {
            Some(requested) => available
                .iter()
                .find(|s| s.as_str() == requested)
                .cloned()
                .ok_or_else(|| ConvertError::SheetNotFound {
                    sheet: requested.to_string(),
                    available: available.clone(),
                })?,
            None => available.first().cloned().ok_or_else(|| ConvertError::SourceFormat {
                path: self.path.clone(),
                reason: "workbook contains no sheets".to_string(),
            })?,
        };

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| self.format_error(format!("cannot read sheet '{}': {}", name, e)))?;

        let (headers, rows) = rows_from_range(&range);
        info!(
            sheet = %name,
            columns = headers.len(),
            rows = rows.len(),
            "loaded sheet"
        );

        Ok(SheetData {
            name,
            headers,
            rows,
        })
    }

    fn open(&self) -> ConvertResult<Sheets<BufReader<File>>> {
        if !self.path.exists() {
            return Err(ConvertError::SourceNotFound(self.path.clone()));
        }
        debug!(path = %self.path.display(), "opening workbook");
        open_workbook_auto(&self.path).map_err(|e| self.format_error(e.to_string()))
    }

    fn format_error(&self, reason: String) -> ConvertError {
        ConvertError::SourceFormat {
            path: self.path.clone(),
            reason,
        }
    }
}

/// Split a sheet range into headers (first row) and data rows.
///
/// Every row inside the used range yields a [`Row`], blank ones included.
pub fn rows_from_range(range: &Range<Data>) -> (Vec<String>, Vec<Row>) {
    if range.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // The used range can start past column A
    let first_col = range.start().map_or(0, |(_, col)| col as usize);
    let mut lines = range.rows();
    let headers: Vec<String> = match lines.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(col, cell)| header_name(cell, first_col + col))
            .collect(),
        None => return (Vec::new(), Vec::new()),
    };

    let rows = lines
        .map(|cells| {
            let mut row = Row::with_capacity(headers.len());
            for (col, header) in headers.iter().enumerate() {
                let value = cells.get(col).map(normalize_cell).unwrap_or(CellValue::Empty);
                row.push(header.clone(), value);
            }
            row
        })
        .collect();

    (headers, rows)
}

/// Header text for a column; blank headers become `col_{n}` with the sheet's
/// 0-based column number
fn header_name(cell: &Data, col: usize) -> String {
    let name = normalize_cell(cell).display();
    if name.trim().is_empty() {
        format!("col_{}", col)
    } else {
        name
    }
}

/// Convert a raw spreadsheet cell to a [`CellValue`]
pub fn normalize_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT => CellValue::Number(*i as f64),
        // Beyond 2^53 an f64 would round; keep the digits
        Data::Int(i) => CellValue::Text(i.to_string()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Text(format_duration(dt.as_f64())),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::from_datetime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s).unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<CellValue> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(CellValue::from_datetime(dt));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(CellValue::Date)
}

/// Render a duration stored as fractional days as `H:MM:SS`
fn format_duration(days: f64) -> String {
    let total = (days * 86_400.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
