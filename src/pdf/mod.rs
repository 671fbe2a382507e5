//! PDF record rendering
//!
//! Turns one [`Row`](crate::types::Row) into a paginated PDF containing a
//! bordered two-column table (field name | value) titled `Record {index}`.
//! Uses the built-in Type1 fonts, so no font files are needed.

mod document;
mod encoding;
mod layout;
mod metrics;
mod renderer;

pub use document::build_document;
pub use encoding::{contain_text, encode_winansi, winansi_byte};
pub use layout::{layout_document, DocumentLayout, PageLayout, RowSlice};
pub use metrics::FontMetrics;
pub use renderer::{render_row, RowRenderer};

use std::path::PathBuf;
use thiserror::Error;

/// Failure confined to a single row
#[derive(Error, Debug)]
pub enum RowRenderError {
    #[error(
        "Column '{column}' contains {character:?} ({}) which the PDF font cannot encode",
        .character.escape_unicode()
    )]
    Unencodable { column: String, character: char },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
