use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort a whole run.
///
/// Row-level failures never show up here; they are captured as
/// [`crate::pdf::RowRenderError`] inside each `ConversionResult`.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Cannot read '{}' as a spreadsheet: {reason}", path.display())]
    SourceFormat { path: PathBuf, reason: String },

    #[error("Sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Cannot create output directory '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sample workbook error: {0}")]
    Sample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// True for errors caused by the input workbook rather than the environment
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ConvertError::SourceNotFound(_)
                | ConvertError::SourceFormat { .. }
                | ConvertError::SheetNotFound { .. }
        )
    }
}
