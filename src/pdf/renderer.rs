//! Row renderer: one row in, one artifact (or one recorded failure) out

use super::document::build_document;
use super::layout::layout_document;
use super::RowRenderError;
use crate::config::RenderConfig;
use crate::types::{ConversionResult, Row};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Renders rows against a fixed configuration
pub struct RowRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> RowRenderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Build the PDF for one row entirely in memory
    pub fn render_to_bytes(&self, row: &Row, index: usize) -> Result<Vec<u8>, RowRenderError> {
        let layout = layout_document(row, index, self.config)?;
        Ok(build_document(&layout, self.config))
    }

    /// Render and write one row's artifact.
    ///
    /// Never fails: any error is folded into the returned result so the
    /// caller can move on to the next row.
    pub fn render(&self, row: &Row, index: usize) -> ConversionResult {
        let path = self.config.artifact_path(index);

        match self.try_render(row, index, &path) {
            Ok(()) => {
                debug!(index, path = %path.display(), "rendered record");
                ConversionResult::succeeded(index, path)
            }
            Err(e) => {
                warn!(index, error = %e, "failed to render record");
                discard_stale_artifact(&path);
                ConversionResult::failed(index, e.to_string())
            }
        }
    }

    fn try_render(&self, row: &Row, index: usize, path: &Path) -> Result<(), RowRenderError> {
        let bytes = self.render_to_bytes(row, index)?;
        write_atomically(path, &bytes)
    }
}

/// Convenience wrapper: render one row with `config`
pub fn render_row(row: &Row, index: usize, config: &RenderConfig) -> ConversionResult {
    RowRenderer::new(config).render(row, index)
}

/// Write through a temp file in the target directory, then rename over the
/// final path. The temp file is deleted on every error path.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), RowRenderError> {
    let write_err = |source: std::io::Error| RowRenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".rowpdf-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// A failed row must not leave an artifact behind, including one from an
/// earlier run with the same prefix.
fn discard_stale_artifact(path: &Path) {
    if path.is_file() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove stale artifact");
        }
    }
}
