//! Table layout: column widths, word wrapping and pagination

use super::encoding::{contain_text, encode_winansi};
use super::metrics::FontMetrics;
use super::RowRenderError;
use crate::config::RenderConfig;
use crate::types::Row;

/// Label column bounds, as fractions of the usable width
const LABEL_MIN_FRACTION: f32 = 0.20;
const LABEL_MAX_FRACTION: f32 = 0.45;

/// One encoded table row, already wrapped to its column widths
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: Vec<Vec<u8>>,
    pub value: Vec<Vec<u8>>,
}

impl TableRow {
    pub fn line_count(&self) -> usize {
        self.label.len().max(self.value.len()).max(1)
    }
}

/// The part of a table row drawn on one page
#[derive(Debug, Clone, PartialEq)]
pub struct RowSlice {
    /// y coordinate of the slice's top edge
    pub top: f32,
    pub height: f32,
    pub label: Vec<Vec<u8>>,
    pub value: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub slices: Vec<RowSlice>,
}

/// Complete geometry for one record document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: Vec<u8>,
    /// Baseline origin of the title on the first page
    pub title_origin: (f32, f32),
    pub label_width: f32,
    pub value_width: f32,
    pub pages: Vec<PageLayout>,
}

/// Encode each (label, value) pair, failing on the first character the
/// font cannot represent.
pub fn encode_row(row: &Row) -> Result<Vec<(Vec<Vec<u8>>, Vec<Vec<u8>>)>, RowRenderError> {
    row.iter()
        .map(|(column, value)| {
            let label = encode_lines(column, column)?;
            let value = encode_lines(column, &value.display())?;
            Ok((label, value))
        })
        .collect()
}

fn encode_lines(column: &str, text: &str) -> Result<Vec<Vec<u8>>, RowRenderError> {
    contain_text(text)
        .iter()
        .map(|line| {
            encode_winansi(line).map_err(|character| RowRenderError::Unencodable {
                column: column.to_string(),
                character,
            })
        })
        .collect()
}

/// Width of the field-name column: widest label plus padding, clamped so
/// neither column starves the other.
pub fn label_column_width(labels: &[&[Vec<u8>]], config: &RenderConfig) -> f32 {
    let bold = FontMetrics::new(config.font.family, true);
    let widest = labels
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| bold.text_width(line, config.font.size))
        .fold(0.0_f32, f32::max);
    let usable = config.usable_width();
    (widest + 2.0 * config.cell_padding + 1.0)
        .clamp(usable * LABEL_MIN_FRACTION, usable * LABEL_MAX_FRACTION)
}

/// Greedy word wrap of one encoded line; words wider than the cell are
/// broken between characters.
pub fn wrap_line(line: &[u8], max_width: f32, metrics: &FontMetrics, size: f32) -> Vec<Vec<u8>> {
    let space = metrics.text_width(b" ", size);
    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut current_width = 0.0_f32;

    for word in line.split(|b| *b == b' ') {
        let word_width = metrics.text_width(word, size);
        let sep = if current.is_empty() { 0.0 } else { space };

        if current_width + sep + word_width <= max_width {
            if !current.is_empty() {
                current.push(b' ');
            }
            current.extend_from_slice(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.extend_from_slice(word);
            current_width = word_width;
            continue;
        }

        for &byte in word {
            let w = metrics.text_width(&[byte], size);
            if current_width + w > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(byte);
            current_width += w;
        }
    }

    lines.push(current);
    lines
}

fn wrap_lines(lines: &[Vec<u8>], max_width: f32, metrics: &FontMetrics, size: f32) -> Vec<Vec<u8>> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, max_width, metrics, size))
        .collect()
}

/// Lay out a whole record: title, column widths, wrapped cells, pages.
pub fn layout_document(
    row: &Row,
    index: usize,
    config: &RenderConfig,
) -> Result<DocumentLayout, RowRenderError> {
    let (_, page_height) = config.page_size.dimensions();
    let usable_width = config.usable_width();
    if usable_width <= 2.0 * config.cell_padding || config.usable_height() <= 0.0 {
        return Err(RowRenderError::Layout(
            "page margins leave no room for the table".to_string(),
        ));
    }

    let encoded = encode_row(row)?;
    let labels: Vec<&[Vec<u8>]> = encoded.iter().map(|(label, _)| label.as_slice()).collect();
    let label_width = label_column_width(&labels, config);
    let value_width = usable_width - label_width;

    let size = config.font.size;
    let bold = FontMetrics::new(config.font.family, true);
    let regular = FontMetrics::new(config.font.family, false);
    let label_text_width = label_width - 2.0 * config.cell_padding;
    let value_text_width = value_width - 2.0 * config.cell_padding;

    let rows: Vec<TableRow> = encoded
        .iter()
        .map(|(label, value)| TableRow {
            label: wrap_lines(label, label_text_width, &bold, size),
            value: wrap_lines(value, value_text_width, &regular, size),
        })
        .collect();

    let title = format!("Record {}", index).into_bytes();
    let title_size = config.font.title_size;
    let title_width = bold.text_width(&title, title_size);
    let top = page_height - config.margins.top;
    let title_origin = (
        config.margins.left + ((usable_width - title_width) / 2.0).max(0.0),
        top - title_size,
    );
    let table_top = top - config.title_block_height();

    let pages = paginate(&rows, table_top, top, config)?;

    Ok(DocumentLayout {
        title,
        title_origin,
        label_width,
        value_width,
        pages,
    })
}

/// Distribute table rows over pages. A row that does not fit the rest of the
/// page moves to a fresh page; a row taller than a whole page is split by lines.
fn paginate(
    rows: &[TableRow],
    first_top: f32,
    page_top: f32,
    config: &RenderConfig,
) -> Result<Vec<PageLayout>, RowRenderError> {
    let line_height = config.line_height();
    let padding = config.cell_padding + config.cell_padding_bottom;
    let bottom = config.margins.bottom;
    let slice_height = |lines: usize| padding + lines as f32 * line_height;

    if page_top - bottom < config.min_cell_height() {
        return Err(RowRenderError::Layout(
            "page is too short to hold a single table line".to_string(),
        ));
    }

    let mut pages = vec![PageLayout::default()];
    let mut y = first_top;

    for row in rows {
        let total = row.line_count();
        let mut start = 0;

        while start < total {
            let remaining = total - start;
            let available = y - bottom;
            let fitting = if available >= padding + line_height {
                ((available - padding) / line_height).floor() as usize
            } else {
                0
            };
            let page_has_content = pages.last().is_some_and(|p| !p.slices.is_empty());
            let full_page_lines = ((page_top - bottom - padding) / line_height).floor() as usize;

            // Keep a row together when moving it to a new page would help
            let fresh_page_helps = remaining <= full_page_lines || fitting == 0;
            if fitting < remaining && page_has_content && fresh_page_helps {
                pages.push(PageLayout::default());
                y = page_top;
                continue;
            }
            if fitting == 0 {
                // Fresh page and still no room: the first page title ate it
                pages.push(PageLayout::default());
                y = page_top;
                continue;
            }

            let take = remaining.min(fitting);
            let end = start + take;
            let height = slice_height(take);
            let slice = RowSlice {
                top: y,
                height,
                label: slice_lines(&row.label, start, end),
                value: slice_lines(&row.value, start, end),
            };
            if let Some(page) = pages.last_mut() {
                page.slices.push(slice);
            }
            y -= height;
            start = end;

            if start < total {
                pages.push(PageLayout::default());
                y = page_top;
            }
        }
    }

    Ok(pages)
}

fn slice_lines(lines: &[Vec<u8>], start: usize, end: usize) -> Vec<Vec<u8>> {
    if start >= lines.len() {
        return Vec::new();
    }
    lines[start..end.min(lines.len())].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontFamily, PageSize};
    use crate::types::CellValue;

    fn metrics() -> FontMetrics {
        FontMetrics::new(FontFamily::Courier, false)
    }

    #[test]
    fn test_wrap_line_fits() {
        // Courier at 10pt: 6pt per glyph
        let lines = wrap_line(b"hello world", 100.0, &metrics(), 10.0);
        assert_eq!(lines, vec![b"hello world".to_vec()]);
    }

    #[test]
    fn test_wrap_line_breaks_on_spaces() {
        let lines = wrap_line(b"aaaa bbbb cccc", 60.0, &metrics(), 10.0);
        assert_eq!(lines, vec![b"aaaa bbbb".to_vec(), b"cccc".to_vec()]);
    }

    #[test]
    fn test_wrap_line_breaks_long_words() {
        let lines = wrap_line(b"abcdefghij", 30.0, &metrics(), 10.0);
        assert_eq!(lines, vec![b"abcde".to_vec(), b"fghij".to_vec()]);
    }

    #[test]
    fn test_wrap_empty_line_is_one_blank_line() {
        let lines = wrap_line(b"", 30.0, &metrics(), 10.0);
        assert_eq!(lines, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_label_width_is_clamped() {
        let config = RenderConfig::default();
        let usable = config.usable_width();

        let short = vec![b"Id".to_vec()];
        let narrow = label_column_width(&[short.as_slice()], &config);
        assert!((narrow - usable * LABEL_MIN_FRACTION).abs() < 1e-3);

        let long = vec![vec![b'W'; 200]];
        let wide = label_column_width(&[long.as_slice()], &config);
        assert!((wide - usable * LABEL_MAX_FRACTION).abs() < 1e-3);
    }

    #[test]
    fn test_layout_keeps_every_column_in_order() {
        let mut row = Row::new();
        row.push("Name", "Jane");
        row.push("Email", CellValue::Empty);
        row.push("Age", 35.0);

        let layout = layout_document(&row, 2, &RenderConfig::default()).unwrap();
        assert_eq!(layout.title, b"Record 2".to_vec());
        assert_eq!(layout.pages.len(), 1);

        let slices = &layout.pages[0].slices;
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, vec![b"Name".to_vec()]);
        assert_eq!(slices[1].label, vec![b"Email".to_vec()]);
        assert_eq!(slices[1].value, vec![Vec::<u8>::new()]);
        assert_eq!(slices[2].value, vec![b"35".to_vec()]);
        assert!(slices[0].top > slices[1].top);
    }

    #[test]
    fn test_layout_rejects_unencodable_value() {
        let mut row = Row::new();
        row.push("City", "東京");
        let err = layout_document(&row, 1, &RenderConfig::default()).unwrap_err();
        match err {
            RowRenderError::Unencodable { column, character } => {
                assert_eq!(column, "City");
                assert_eq!(character, '東');
            }
            other => panic!("expected Unencodable, got {other:?}"),
        }
    }

    #[test]
    fn test_wide_punctuation_wraps_inside_value_cell() {
        let config = RenderConfig::default();
        let mut row = Row::new();
        row.push("Notes", "\u{2014}".repeat(120));

        let layout = layout_document(&row, 1, &config).unwrap();
        let regular = FontMetrics::new(config.font.family, false);
        let limit = layout.value_width - 2.0 * config.cell_padding;

        let lines: Vec<&Vec<u8>> = layout
            .pages
            .iter()
            .flat_map(|p| p.slices.iter())
            .flat_map(|s| s.value.iter())
            .collect();
        // em dash is a full em in Helvetica: 10pt each at the default size
        assert!(lines.len() >= (1200.0 / limit).ceil() as usize);
        for line in &lines {
            let width = regular.text_width(line, config.font.size);
            assert!(width <= limit + 1e-3, "line {width}pt exceeds {limit}pt");
        }
        let dashes: usize = lines.iter().map(|l| l.len()).sum();
        assert_eq!(dashes, 120);
    }

    #[test]
    fn test_many_rows_paginate() {
        let row: Row = (0..120)
            .map(|i| (format!("Field {i}"), CellValue::Number(i as f64)))
            .collect();
        let layout = layout_document(&row, 1, &RenderConfig::default()).unwrap();
        assert!(layout.pages.len() > 1);

        let placed: usize = layout.pages.iter().map(|p| p.slices.len()).sum();
        assert_eq!(placed, 120);

        let bottom = RenderConfig::default().margins.bottom;
        for page in &layout.pages {
            for slice in &page.slices {
                assert!(slice.top - slice.height >= bottom - 1e-3);
            }
        }
    }

    #[test]
    fn test_tall_value_is_split_across_pages() {
        let config = RenderConfig::default().with_page_size(PageSize::Custom {
            width: 400.0,
            height: 300.0,
        });
        let text = (0..80).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut row = Row::new();
        row.push("Notes", text);

        let layout = layout_document(&row, 1, &config).unwrap();
        assert!(layout.pages.len() > 1);
        let lines: usize = layout
            .pages
            .iter()
            .flat_map(|p| p.slices.iter())
            .map(|s| s.value.len())
            .sum();
        assert_eq!(lines, 80);
    }
}
