//! Batch conversion: every row of a sheet → one PDF each

use crate::config::RenderConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::excel::SheetLoader;
use crate::pdf::RowRenderer;
use crate::types::{ConversionSummary, Row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Converts the rows of one workbook into per-row PDFs
pub struct Converter {
    loader: SheetLoader,
    config: RenderConfig,
}

impl Converter {
    /// Create a converter writing into `output_dir` with default styling
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: P, output_dir: Q) -> Self {
        Self::with_config(source, RenderConfig::default().with_output_dir(output_dir))
    }

    /// Create a converter with a full render config (its `output_dir` is used)
    pub fn with_config<P: AsRef<Path>>(source: P, config: RenderConfig) -> Self {
        Self {
            loader: SheetLoader::new(source),
            config,
        }
    }

    pub fn source(&self) -> &Path {
        self.loader.path()
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn list_sheets(&self) -> ConvertResult<Vec<String>> {
        self.loader.list_sheets()
    }

    /// Convert every row of `sheet_name` (first sheet if `None`).
    ///
    /// Loading and output-directory errors abort the run; row failures are
    /// recorded in the summary and the batch continues.
    pub fn convert(&self, sheet_name: Option<&str>, prefix: &str) -> ConvertResult<ConversionSummary> {
        let config = self.config.clone().with_prefix(prefix);
        config.validate()?;

        let sheet = self.loader.load(sheet_name)?;
        info!(
            source = %self.loader.path().display(),
            sheet = %sheet.name,
            rows = sheet.rows.len(),
            "converting sheet"
        );
        convert_rows(&sheet.rows, &config)
    }
}

/// Create the output directory if needed. Safe to call repeatedly.
pub fn ensure_output_dir(path: &Path) -> ConvertResult<()> {
    fs::create_dir_all(path).map_err(|source| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `rows` in order with record indices starting at 1.
///
/// Exactly one result is produced per row, whether it succeeds or not. A
/// config that cannot fit a table line is rejected before anything is written.
pub fn convert_rows(rows: &[Row], config: &RenderConfig) -> ConvertResult<ConversionSummary> {
    config.validate()?;
    ensure_output_dir(&config.output_dir)?;

    let renderer = RowRenderer::new(config);
    let mut summary = ConversionSummary::new(config.output_dir.clone());

    for (i, row) in rows.iter().enumerate() {
        summary.record(renderer.render(row, i + 1));
    }

    if summary.failed > 0 {
        warn!(
            failed = summary.failed,
            total = summary.total,
            "batch finished with failures"
        );
    } else {
        info!(total = summary.total, "batch finished");
    }
    Ok(summary)
}

/// Write a summary as pretty JSON
pub fn write_report(summary: &ConversionSummary, path: &Path) -> ConvertResult<PathBuf> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;
    use crate::types::CellValue;
    use tempfile::TempDir;

    fn rows(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| {
                let mut row = Row::new();
                row.push("Value", *v);
                row
            })
            .collect()
    }

    #[test]
    fn test_convert_rows_indices_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig::new(temp_dir.path().join("out"), "rec");

        let summary = convert_rows(&rows(&["a", "b", "c"]), &config).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);
        let indices: Vec<usize> = summary.results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(temp_dir.path().join("out/rec_003.pdf").exists());
    }

    #[test]
    fn test_convert_rows_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig::new(temp_dir.path(), "row");

        let summary = convert_rows(&rows(&["ok", "🚫", "ok"]), &config).unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        let failed: Vec<usize> = summary.failures().map(|r| r.index).collect();
        assert_eq!(failed, vec![2]);
        assert!(!temp_dir.path().join("row_002.pdf").exists());
    }

    #[test]
    fn test_convert_rows_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig::new(temp_dir.path().join("nothing"), "row");

        let summary = convert_rows(&[], &config).unwrap();

        assert_eq!(summary.total, 0);
        assert!(temp_dir.path().join("nothing").is_dir());
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a/b");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("taken");
        fs::write(&blocker, b"file").unwrap();
        let config = RenderConfig::new(&blocker, "row");

        let err = convert_rows(&rows(&["x"]), &config).unwrap_err();
        assert!(matches!(err, ConvertError::OutputWrite { .. }));
    }

    #[test]
    fn test_page_without_room_for_a_line_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let config = RenderConfig::new(&out, "row").with_page_size(PageSize::Custom {
            width: 400.0,
            height: 100.0,
        });

        let err = convert_rows(&rows(&["a", "b", "c"]), &config).unwrap_err();

        assert!(matches!(err, ConvertError::Config(_)), "{err:?}");
        assert!(!out.exists());
    }

    #[test]
    fn test_write_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig::new(temp_dir.path(), "row");
        let mut row = Row::new();
        row.push("Email", CellValue::Empty);
        let summary = convert_rows(&[row], &config).unwrap();

        let report = temp_dir.path().join("summary.json");
        write_report(&summary, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["succeeded"], 1);
        assert_eq!(value["results"][0]["index"], 1);
        assert_eq!(value["results"][0]["success"], true);
    }
}
