use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

//==============================================================================
// Cell Values
//==============================================================================

/// A single normalized spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Bool(bool),
}

impl CellValue {
    /// Build a date value, collapsing midnight timestamps to a plain date
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 && dt.nanosecond() == 0 {
            CellValue::Date(dt.date())
        } else {
            CellValue::DateTime(dt)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Display string used in rendered documents
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Format a number for display without locale or float-noise artifacts.
///
/// Rust's shortest round-trip formatting already prints `0.1` as `0.1` and
/// `42.0` as `42`; negative zero and non-finite values need special casing.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return String::new();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{}", n)
}

//==============================================================================
// Rows
//==============================================================================

/// One source record: column name → value, in sheet column order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Append a column. Duplicate names are kept; order is significant.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// First value stored under `column`
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every value is empty (interior blank rows)
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_empty())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

//==============================================================================
// Conversion Results
//==============================================================================

/// Outcome of rendering one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// 1-based record index
    pub index: usize,
    pub output_path: Option<PathBuf>,
    pub success: bool,
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn succeeded(index: usize, output_path: PathBuf) -> Self {
        Self {
            index,
            output_path: Some(output_path),
            success: true,
            error: None,
        }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            output_path: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub output_dir: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ConversionResult>,
}

impl ConversionSummary {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            total: 0,
            succeeded: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: ConversionResult) {
        self.total += 1;
        if result.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Failed results, in the order they were recorded
    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}
