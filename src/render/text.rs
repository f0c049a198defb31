//! Plain text rendering with page and column markers.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{Document, Page, Paragraph, TextChunk};
use crate::parser::{ColumnDetector, ReadingOrderSequencer, ReconstructionOptions};

use super::RenderOptions;

/// Marker line placed between pages.
pub const PAGE_BREAK: &str = "--- Page Break ---";

/// Marker line placed between columns of one page.
pub const COLUMN_BREAK: &str = "[Column Break]";

/// Convert a reconstructed document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let pages: Vec<String> = doc
        .pages
        .iter()
        .map(|page| render_page(page, options))
        .filter(|text| !text.is_empty())
        .collect();

    let separator = if options.mark_pages {
        page_separator()
    } else {
        "\n\n".to_string()
    };
    Ok(pages.join(&separator))
}

/// Rebuild flat text directly from parsed chunks.
///
/// Each page is split into columns, each column is read top to bottom with
/// blank lines at paragraph gaps, and the pieces are joined with
/// [`COLUMN_BREAK`] and [`PAGE_BREAK`] lines in ascending page order.
pub fn to_flat_text(chunks: &[TextChunk], options: &ReconstructionOptions) -> String {
    let detector = ColumnDetector::new(options.gap_threshold);
    let sequencer = ReadingOrderSequencer::new(options.order, options.paragraph_gap_threshold);

    let mut by_page: BTreeMap<u32, Vec<&TextChunk>> = BTreeMap::new();
    for chunk in chunks {
        by_page.entry(chunk.page()).or_default().push(chunk);
    }

    let pages: Vec<String> = by_page
        .into_iter()
        .map(|(number, page_chunks)| {
            let layout = detector.detect(&page_chunks);
            let mut columns: Vec<Vec<&TextChunk>> = vec![Vec::new(); layout.count()];
            for (chunk, column) in page_chunks.iter().zip(&layout.assignments) {
                columns[*column].push(*chunk);
            }
            log::debug!("Flat text page {}: {} columns", number, columns.len());

            columns
                .iter()
                .map(|column| sequencer.column_text(column))
                .collect::<Vec<_>>()
                .join(&column_separator())
        })
        .collect();

    pages.join(&page_separator())
}

fn page_separator() -> String {
    format!("\n\n{}\n\n", PAGE_BREAK)
}

fn column_separator() -> String {
    format!("\n\n{}\n\n", COLUMN_BREAK)
}

fn render_page(page: &Page, options: &RenderOptions) -> String {
    if page.columns > 1 && options.mark_columns {
        (0..page.columns)
            .map(|index| render_lines(page.column(index), options.paragraph_gap_threshold))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(&column_separator())
    } else {
        render_lines(page.paragraphs.iter(), options.paragraph_gap_threshold)
    }
}

fn render_lines<'a>(paragraphs: impl Iterator<Item = &'a Paragraph>, threshold: f32) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for paragraph in paragraphs {
        if !lines.is_empty() && paragraph.starts_paragraph(threshold) {
            lines.push("");
        }
        lines.push(&paragraph.text);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;
    use crate::parser::DocumentAssembler;

    fn chunk(text: &str, page: u32, bbox: BoundingBox) -> TextChunk {
        TextChunk::new(text.to_string(), page, bbox, None)
    }

    fn two_column_chunks() -> Vec<TextChunk> {
        vec![
            chunk("Left col", 0, BoundingBox::new(0.05, 0.1, 0.45, 0.2)),
            chunk("Right col", 0, BoundingBox::new(0.55, 0.1, 0.95, 0.2)),
        ]
    }

    #[test]
    fn test_flat_text_column_break() {
        let text = to_flat_text(&two_column_chunks(), &ReconstructionOptions::default());
        assert_eq!(text, "Left col\n\n[Column Break]\n\nRight col");
    }

    #[test]
    fn test_flat_text_page_break_in_page_order() {
        let chunks = vec![
            chunk("Second page", 1, BoundingBox::new(0.1, 0.1, 0.9, 0.13)),
            chunk("First page", 0, BoundingBox::new(0.1, 0.1, 0.9, 0.13)),
        ];
        let text = to_flat_text(&chunks, &ReconstructionOptions::default());
        assert_eq!(text, "First page\n\n--- Page Break ---\n\nSecond page");
    }

    #[test]
    fn test_flat_text_paragraph_gap() {
        let chunks = vec![
            chunk("Third", 0, BoundingBox::new(0.1, 0.5, 0.9, 0.53)),
            chunk("First", 0, BoundingBox::new(0.1, 0.1, 0.9, 0.13)),
            chunk("Second", 0, BoundingBox::new(0.1, 0.14, 0.9, 0.17)),
        ];
        let text = to_flat_text(&chunks, &ReconstructionOptions::default());
        assert_eq!(text, "First\nSecond\n\nThird");
    }

    #[test]
    fn test_flat_text_empty() {
        assert_eq!(to_flat_text(&[], &ReconstructionOptions::default()), "");
    }

    #[test]
    fn test_to_text_from_document() {
        let doc = DocumentAssembler::default().assemble(&two_column_chunks());
        let text = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(text, "Left col\n\n[Column Break]\n\nRight col");

        let unmarked = to_text(&doc, &RenderOptions::new().with_column_markers(false)).unwrap();
        assert!(!unmarked.contains(COLUMN_BREAK));
        assert!(unmarked.contains("Left col"));
    }

    #[test]
    fn test_to_text_page_markers() {
        let mut doc = Document::new();
        for number in 0..2 {
            let mut page = Page::new(number);
            page.add_paragraph(Paragraph::new(
                format!("Page {}", number),
                number,
                BoundingBox::full_page(),
            ));
            doc.add_page(page);
        }

        let marked = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(marked, "Page 0\n\n--- Page Break ---\n\nPage 1");

        let plain = to_text(&doc, &RenderOptions::new().with_page_markers(false)).unwrap();
        assert_eq!(plain, "Page 0\n\nPage 1");
    }
}
