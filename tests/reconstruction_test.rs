//! Integration tests for the reconstruction pipeline.

use std::io::{Seek, SeekFrom, Write};

use serde_json::json;
use unocr::parser::{GroundedAdapter, PhraseFilter};
use unocr::render::{self, JsonFormat, RenderOptions, COLUMN_BREAK, PAGE_BREAK};
use unocr::{
    BoundingBox, ChunkParser, Document, Error, Positioned, ReconstructionOptions, TextType, Unocr,
};

fn record(text: &str, page: u32, bbox: [f32; 4]) -> serde_json::Value {
    json!({
        "type": "text",
        "text": text,
        "grounding": {
            "page": page,
            "box": {"left": bbox[0], "top": bbox[1], "right": bbox[2], "bottom": bbox[3]}
        }
    })
}

fn texts(doc: &Document) -> Vec<&str> {
    doc.paragraphs().map(|p| p.text.as_str()).collect()
}

// ==================== End-to-End ====================

#[test]
fn test_two_column_page() {
    let input = json!([
        record("Left col", 0, [0.05, 0.1, 0.45, 0.2]),
        record("Right col", 0, [0.55, 0.1, 0.95, 0.2]),
    ]);

    let doc = unocr::parse_value(&input).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages[0].columns, 2);
    assert_eq!(texts(&doc), vec!["Left col", "Right col"]);

    let chunks = ChunkParser::default().parse_value(&input).unwrap();
    let flat = render::to_flat_text(&chunks, &ReconstructionOptions::default());
    let left = flat.find("Left col").unwrap();
    let marker = flat.find(COLUMN_BREAK).unwrap();
    let right = flat.find("Right col").unwrap();
    assert!(left < marker && marker < right);
}

#[test]
fn test_newspaper_layout() {
    // Two columns of body text, given out of order.
    let input = json!([
        record("Second column, second line", 0, [0.52, 0.33, 0.95, 0.3575]),
        record("First column, first line", 0, [0.05, 0.30, 0.48, 0.3275]),
        record("Second column, first line", 0, [0.52, 0.30, 0.95, 0.3275]),
        record("First column, new paragraph", 0, [0.05, 0.45, 0.48, 0.4775]),
    ]);

    let doc = unocr::parse_value(&input).unwrap();
    let page = &doc.pages[0];
    assert_eq!(page.columns, 2);
    assert_eq!(
        texts(&doc),
        vec![
            "First column, first line",
            "First column, new paragraph",
            "Second column, first line",
            "Second column, second line",
        ]
    );
    assert!(page.paragraphs.iter().all(|p| p.text_type == TextType::Body));
    assert!(page.paragraphs[1].starts_paragraph(0.05));
    assert!(!page.paragraphs[3].starts_paragraph(0.05));

    let text = render::to_text(&doc, &RenderOptions::default()).unwrap();
    assert_eq!(
        text,
        "First column, first line\n\nFirst column, new paragraph\n\n[Column Break]\n\n\
         Second column, first line\nSecond column, second line"
    );
}

#[test]
fn test_row_first_ordering() {
    let input = json!([
        record("B1", 0, [0.55, 0.1, 0.95, 0.13]),
        record("A2", 0, [0.05, 0.5, 0.45, 0.53]),
        record("A1", 0, [0.05, 0.1, 0.45, 0.13]),
        record("B2", 0, [0.55, 0.5, 0.95, 0.53]),
    ]);

    let column_first = Unocr::new().parse_value(&input).unwrap();
    assert_eq!(texts(column_first.document()), vec!["A1", "A2", "B1", "B2"]);

    let row_first = Unocr::new().row_first().parse_value(&input).unwrap();
    assert_eq!(texts(row_first.document()), vec!["A1", "B1", "A2", "B2"]);
}

#[test]
fn test_reading_order_ignores_input_order() {
    let input = json!([
        record("third", 0, [0.1, 0.5, 0.9, 0.53]),
        record("first", 0, [0.1, 0.1, 0.9, 0.13]),
        record("second", 0, [0.1, 0.3, 0.9, 0.33]),
    ]);
    let doc = unocr::parse_value(&input).unwrap();
    assert_eq!(texts(&doc), vec!["first", "second", "third"]);
}

#[test]
fn test_pages_in_ascending_order() {
    let input = json!([
        record("page three", 2, [0.1, 0.1, 0.9, 0.13]),
        record("page one", 0, [0.1, 0.1, 0.9, 0.13]),
        record("page two", 1, [0.1, 0.1, 0.9, 0.13]),
    ]);

    let result = Unocr::new().parse_value(&input).unwrap();
    assert_eq!(texts(result.document()), vec!["page one", "page two", "page three"]);

    let flat = result.to_flat_text();
    assert_eq!(flat.matches(PAGE_BREAK).count(), 2);
    assert!(flat.starts_with("page one"));
    assert!(flat.ends_with("page three"));
}

#[test]
fn test_font_roles() {
    let input = json!([
        record("Annual Report", 0, [0.1, 0.05, 0.9, 0.12]),
        record("Summary", 0, [0.1, 0.15, 0.9, 0.1825]),
        record("Revenue grew in every region.", 0, [0.1, 0.2, 0.9, 0.2275]),
        record("Figures unaudited.", 0, [0.1, 0.9, 0.9, 0.92]),
    ]);

    let doc = unocr::parse_value(&input).unwrap();
    let roles: Vec<TextType> = doc.paragraphs().map(|p| p.text_type).collect();
    assert_eq!(
        roles,
        vec![
            TextType::Title,
            TextType::Heading,
            TextType::Body,
            TextType::Small
        ]
    );
    assert_eq!(doc.paragraphs().next().unwrap().font_size, Some(28.0));
    assert_eq!(doc.metadata.text_type_counts[&TextType::Body], 1);

    let markdown = render::to_markdown(&doc, &RenderOptions::default()).unwrap();
    assert!(markdown.starts_with("# Annual Report\n\n### Summary\n\nRevenue grew"));
}

#[test]
fn test_height_for_thirteen_points_is_heading() {
    let input = json!([record("Section", 0, [0.1, 0.1, 0.9, 0.1325])]);
    let doc = unocr::parse_value(&input).unwrap();
    let paragraph = doc.paragraphs().next().unwrap();
    assert_eq!(paragraph.font_size, Some(13.0));
    assert_eq!(paragraph.text_type, TextType::Heading);
}

#[test]
fn test_body_text_with_leading_hash_is_not_a_markdown_heading() {
    let input = json!([record("# not a heading", 0, [0.1, 0.1, 0.9, 0.1275])]);
    let doc = unocr::parse_value(&input).unwrap();
    assert_eq!(doc.paragraphs().next().unwrap().text_type, TextType::Body);

    let markdown = render::to_markdown(&doc, &RenderOptions::default()).unwrap();
    assert_eq!(markdown, "\\# not a heading");
}

// ==================== Decorative Filtering ====================

#[test]
fn test_logo_excluded_everywhere() {
    let input = json!([
        {"type": "logo", "text": "ACME Corporation",
         "grounding": {"page": 0, "box": {"left": 0.1, "top": 0.02, "right": 0.3, "bottom": 0.08}}},
        {"type": "chunkScanCode", "text": "https://example.com/verify"},
        {"type": "chunk_signature", "text": "J. Smith"},
        record("Invoice total: 42 EUR", 0, [0.1, 0.2, 0.9, 0.2275]),
    ]);

    let result = Unocr::new().parse_value(&input).unwrap();
    assert_eq!(texts(result.document()), vec!["Invoice total: 42 EUR"]);
    assert!(!result.to_flat_text().contains("ACME"));
    assert!(!result.to_text().unwrap().contains("ACME"));
    assert_eq!(result.report().dropped_decorative, 3);
    assert_eq!(result.document().metadata.source_chunk_count, 4);
    assert_eq!(result.document().metadata.dropped_chunk_count, 3);
}

#[test]
fn test_visual_descriptions_filtered() {
    let long_text = format!(
        "The city seal appears on page one. {}",
        "Council minutes continue with budget discussion. ".repeat(5)
    );
    let input = json!([
        {"type": "text", "text": "Round blue stamp"},
        {"type": "text", "text": "Company logo with watermark behind the heading, followed by a long paragraph of text that keeps going well past two hundred characters so length alone does not decide anything about whether it should be dropped here."},
        {"type": "text", "text": long_text},
        {"type": "figure_caption", "text": "Watermark"},
        {"text": "Plain sentence"},
    ]);

    let chunks = ChunkParser::default().parse_value(&input).unwrap();
    let kept: Vec<&str> = chunks.iter().map(|c| c.text()).collect();
    assert_eq!(kept, vec![long_text.trim(), "Watermark", "Plain sentence"]);
}

#[test]
fn test_annotations_and_markup_stripped() {
    let input = json!([
        {"markdown": "<a id='0-1'></a>\n\nInvoice <::logo: ACME\nblue circle::> total [illegible]   due"},
    ]);
    let chunks = ChunkParser::default().parse_value(&input).unwrap();
    assert_eq!(chunks[0].text(), "Invoice total due");
}

#[test]
fn test_only_decorative_content_is_empty_document() {
    let input = json!([
        {"type": "logo", "text": "ACME"},
        {"type": "text", "text": "   "},
        {"type": "text", "text": "[blank]"},
    ]);
    let doc = unocr::parse_value(&input).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.page_count(), 0);
    assert_eq!(doc.metadata.dropped_chunk_count, 3);
}

#[test]
fn test_custom_phrase_filter() {
    let filter = PhraseFilter::new(["sello"]).unwrap();
    let parser = ChunkParser::default().with_filter(filter);
    let chunks = parser
        .parse_value(&json!([{"text": "Sello azul"}, {"text": "Round blue stamp"}]))
        .unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text(), "Round blue stamp");
}

#[test]
fn test_parsing_is_idempotent() {
    let input = json!([
        {"type": "logo", "text": "ACME"},
        record("b", 1, [0.5, 0.5, 0.9, 0.6]),
        {"text": "a <::note::> [x]"},
    ]);
    let parser = ChunkParser::default().with_adapter(GroundedAdapter);
    let first = parser.parse_value(&input).unwrap();
    let second = parser.parse_value(&input).unwrap();
    assert_eq!(first, second);
}

// ==================== Grounding Defaults ====================

#[test]
fn test_missing_and_partial_grounding() {
    let input = json!([
        {"text": "no grounding"},
        {"text": "partial box", "grounding": {"page": 1, "box": {"left": 0.1, "top": 0.2}}},
        {"text": "negative page", "grounding": {"page": -3, "box": {"left": 0.1, "top": 0.2, "right": 0.3, "bottom": 0.4}}},
        {"text": "string page", "grounding": {"page": "2"}},
    ]);
    let chunks = ChunkParser::default().parse_value(&input).unwrap();

    assert_eq!(chunks[0].page(), 0);
    assert_eq!(*chunks[0].bbox(), BoundingBox::full_page());
    assert_eq!(chunks[1].page(), 1);
    assert_eq!(*chunks[1].bbox(), BoundingBox::full_page());
    assert_eq!(chunks[2].page(), 0);
    assert_eq!(*chunks[2].bbox(), BoundingBox::new(0.1, 0.2, 0.3, 0.4));
    assert_eq!(chunks[3].page(), 0);
}

#[test]
fn test_out_of_range_coordinates_pass_through() {
    let input = json!([record("wide", 0, [-0.1, 0.2, 1.3, 0.25])]);
    let doc = unocr::parse_value(&input).unwrap();
    let bbox = doc.paragraphs().next().unwrap().bbox;
    assert_eq!(bbox, BoundingBox::new(-0.1, 0.2, 1.3, 0.25));
    assert!(!bbox.is_normalized());
}

// ==================== Input Shape ====================

#[test]
fn test_invalid_input_shape() {
    for input in [json!({"text": "x"}), json!("text"), json!(null), json!([{"text": "x"}, 3])] {
        let result = unocr::parse_value(&input);
        assert!(
            matches!(result, Err(Error::InvalidInputShape(_))),
            "expected shape error for {}",
            input
        );
    }
}

#[test]
fn test_empty_array_is_empty_document() {
    let doc = unocr::parse_str("[]").unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_parse_reader_from_file() {
    let input = json!([
        record("Left col", 0, [0.05, 0.1, 0.45, 0.2]),
        record("Right col", 0, [0.55, 0.1, 0.95, 0.2]),
    ]);
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(input.to_string().as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let doc = unocr::parse_reader(file).unwrap();
    assert_eq!(doc.pages[0].columns, 2);
}

#[test]
fn test_json_output_shape() {
    let input = json!([record("Hello", 0, [0.1, 0.1, 0.9, 0.1275])]);
    let result = Unocr::new().parse_value(&input).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&result.to_json(JsonFormat::Pretty).unwrap()).unwrap();

    let paragraph = &json["pages"][0]["paragraphs"][0];
    assert_eq!(paragraph["text"], "Hello");
    assert_eq!(paragraph["font_size"], 11.0);
    assert_eq!(paragraph["text_type"], "body");
    assert_eq!(paragraph["column"], 0);
    assert!(paragraph["box"]["left"].is_number());
}
