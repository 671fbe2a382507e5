//! PDF object assembly for a laid-out record

use super::layout::{DocumentLayout, RowSlice};
use crate::config::{Color, RenderConfig};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

const PRODUCER: &str = concat!("rowpdf ", env!("CARGO_PKG_VERSION"));

/// Serialize a layout into PDF bytes.
///
/// Output is byte-for-byte deterministic for the same layout and config (no
/// timestamps or random IDs), so re-running a batch reproduces its artifacts.
pub fn build_document(layout: &DocumentLayout, config: &RenderConfig) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let info_id = Ref::new(5);
    let mut next_id = 6;

    pdf.catalog(catalog_id).pages(page_tree_id);

    let title = String::from_utf8_lossy(&layout.title).into_owned();
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .producer(TextStr(PRODUCER));

    pdf.type1_font(regular_id)
        .base_font(Name(config.font.family.regular_name()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(config.font.family.bold_name()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let (page_width, page_height) = config.page_size.dimensions();
    let mut page_ids = Vec::with_capacity(layout.pages.len());

    for (page_number, page_layout) in layout.pages.iter().enumerate() {
        let page_id = Ref::new(next_id);
        let content_id = Ref::new(next_id + 1);
        next_id += 2;
        page_ids.push(page_id);

        let mut content = Content::new();
        if page_number == 0 {
            draw_title(&mut content, layout, config);
        }
        for slice in &page_layout.slices {
            draw_slice(&mut content, slice, layout, config);
        }
        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();
    }

    let page_count = page_ids.len() as i32;
    pdf.pages(page_tree_id).kids(page_ids).count(page_count);

    pdf.finish()
}

fn set_fill(content: &mut Content, color: Color) {
    let (r, g, b) = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, color: Color) {
    let (r, g, b) = color.to_unit();
    content.set_stroke_rgb(r, g, b);
}

fn draw_title(content: &mut Content, layout: &DocumentLayout, config: &RenderConfig) {
    let (x, y) = layout.title_origin;
    set_fill(content, config.colors.text);
    content.begin_text();
    content.set_font(BOLD_FONT, config.font.title_size);
    content.next_line(x, y);
    content.show(Str(&layout.title));
    content.end_text();
}

/// Draw one table row slice: backgrounds, borders, then text
fn draw_slice(content: &mut Content, slice: &RowSlice, layout: &DocumentLayout, config: &RenderConfig) {
    let left = config.margins.left;
    let bottom = slice.top - slice.height;
    let value_left = left + layout.label_width;

    set_fill(content, config.colors.label_background);
    content.rect(left, bottom, layout.label_width, slice.height);
    content.fill_nonzero();

    set_fill(content, config.colors.value_background);
    content.rect(value_left, bottom, layout.value_width, slice.height);
    content.fill_nonzero();

    set_stroke(content, config.colors.border);
    content.set_line_width(config.border_width);
    content.rect(left, bottom, layout.label_width, slice.height);
    content.stroke();
    content.rect(value_left, bottom, layout.value_width, slice.height);
    content.stroke();

    set_fill(content, config.colors.text);
    draw_lines(content, &slice.label, BOLD_FONT, left, slice.top, config);
    draw_lines(content, &slice.value, REGULAR_FONT, value_left, slice.top, config);
}

fn draw_lines(
    content: &mut Content,
    lines: &[Vec<u8>],
    font: Name,
    cell_left: f32,
    cell_top: f32,
    config: &RenderConfig,
) {
    let size = config.font.size;
    let x = cell_left + config.cell_padding;
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let baseline = cell_top - config.cell_padding - size - i as f32 * config.line_height();
        content.begin_text();
        content.set_font(font, size);
        content.next_line(x, baseline);
        content.show(Str(line));
        content.end_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::layout_document;
    use crate::types::Row;

    fn sample_row() -> Row {
        let mut row = Row::new();
        row.push("Name", "John Doe");
        row.push("Salary", 75000.0);
        row
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_document_is_pdf() {
        let config = RenderConfig::default();
        let layout = layout_document(&sample_row(), 1, &config).unwrap();
        let bytes = build_document(&layout, &config);

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"%%EOF"), 1);
        assert_eq!(count(&bytes, b"(Record 1) Tj"), 1);
        assert_eq!(count(&bytes, b"(Name) Tj"), 1);
        assert_eq!(count(&bytes, b"(John Doe) Tj"), 1);
        assert_eq!(count(&bytes, b"(75000) Tj"), 1);
        assert_eq!(count(&bytes, b"/WinAnsiEncoding"), 2);
        assert_eq!(count(&bytes, b"/Helvetica-Bold"), 1);
    }

    #[test]
    fn test_document_is_deterministic() {
        let config = RenderConfig::default();
        let layout = layout_document(&sample_row(), 3, &config).unwrap();
        assert_eq!(build_document(&layout, &config), build_document(&layout, &config));
    }

    #[test]
    fn test_every_cell_is_filled_and_bordered() {
        let config = RenderConfig::default();
        let layout = layout_document(&sample_row(), 1, &config).unwrap();
        let bytes = build_document(&layout, &config);
        // two cells per table row
        assert_eq!(count(&bytes, b" re\nf\n"), 4);
        assert_eq!(count(&bytes, b" re\nS\n"), 4);
    }

    #[test]
    fn test_title_only_on_first_page() {
        let config = RenderConfig::default();
        let row: Row = (0..100).map(|i| (format!("Field {i}"), format!("value {i}"))).collect();
        let layout = layout_document(&row, 9, &config).unwrap();
        assert!(layout.pages.len() > 1);

        let bytes = build_document(&layout, &config);
        assert_eq!(count(&bytes, b"(Record 9) Tj"), 1);
        assert_eq!(count(&bytes, b" re\nS\n"), 200);
    }
}
