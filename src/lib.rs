//! # unocr
//!
//! Reading-order reconstruction for OCR output.
//!
//! OCR services return text fragments positioned by normalized bounding
//! boxes, in whatever order the recognizer emitted them. This library turns
//! that into a document a person can read: pages split into columns,
//! paragraphs in reading order, and each paragraph tagged with an inferred
//! font size and role (title, heading, body, ...). Logos, stamps and other
//! visual elements are filtered out along the way.
//!
//! ## Quick Start
//!
//! ```
//! use unocr::{parse_str, render};
//!
//! fn main() -> unocr::Result<()> {
//!     let json = r#"[
//!         {"type": "text", "text": "Left col",
//!          "grounding": {"page": 0, "box": {"left": 0.05, "top": 0.1, "right": 0.45, "bottom": 0.2}}},
//!         {"type": "text", "text": "Right col",
//!          "grounding": {"page": 0, "box": {"left": 0.55, "top": 0.1, "right": 0.95, "bottom": 0.2}}}
//!     ]"#;
//!
//!     let doc = parse_str(json)?;
//!     assert_eq!(doc.pages[0].columns, 2);
//!
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Vendor adapters**: `text` or `markdown` payloads, grounding defaults
//! - **Decorative filtering**: type tags plus a tunable phrase filter
//! - **Column detection**: horizontal gap analysis per page
//! - **Font inference**: box height to point size to text role
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Quality validation**: scores the font distribution of a rendered result

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Document, Metadata, Page, Paragraph, Positioned, TextChunk, TextType,
};
pub use parser::{
    ChunkParser, CleanupOptions, DecorativeFilter, DocumentAssembler, FontScale, ParseReport,
    PhraseFilter, ReadingOrder, ReconstructionOptions, VendorAdapter,
};
pub use render::{JsonFormat, RenderOptions};
pub use validate::{
    FontSamples, JsonArtifact, QualityValidator, RenderedArtifact, ValidationResult,
    ValidatorOptions,
};

use std::io::Read;
use std::sync::Arc;

use serde_json::Value;

/// Parse an OCR response held in a JSON string and reconstruct a document.
///
/// # Example
///
/// ```
/// use unocr::parse_str;
///
/// let doc = parse_str(r#"[{"text": "Hello"}]"#).unwrap();
/// assert_eq!(doc.paragraph_count(), 1);
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(&value)
}

/// Parse an already-decoded OCR response and reconstruct a document.
pub fn parse_value(value: &Value) -> Result<Document> {
    parse_value_with_options(value, &ReconstructionOptions::default())
}

/// Parse an OCR response with custom options.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use unocr::{parse_value_with_options, ReconstructionOptions};
///
/// let options = ReconstructionOptions::new()
///     .with_gap_threshold(0.3)
///     .row_first();
/// let doc = parse_value_with_options(&json!([{"text": "Hello"}]), &options).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn parse_value_with_options(value: &Value, options: &ReconstructionOptions) -> Result<Document> {
    options.validate()?;
    let parser = ChunkParser::new(options.cleanup.clone())?;
    let (chunks, report) = parser.parse_with_report(value)?;
    Ok(DocumentAssembler::new(options).assemble_with_report(&chunks, &report))
}

/// Parse an OCR response from a reader.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use unocr::parse_reader;
///
/// let file = File::open("response.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let value: Value = serde_json::from_reader(reader)?;
    parse_value(&value)
}

/// Reconstruct a document from chunks that were already parsed.
///
/// Returns [`Error::InvalidOptions`] when the options fail validation.
pub fn reconstruct(chunks: &[TextChunk], options: &ReconstructionOptions) -> Result<Document> {
    options.validate()?;
    Ok(DocumentAssembler::new(options).assemble(chunks))
}

/// Rebuild the flat text of an OCR response, with page and column markers.
///
/// # Example
///
/// ```
/// use unocr::extract_text;
///
/// let text = extract_text(r#"[{"text": "Only line"}]"#).unwrap();
/// assert_eq!(text, "Only line");
/// ```
pub fn extract_text(json: &str) -> Result<String> {
    let chunks = ChunkParser::default().parse_str(json)?;
    Ok(render::to_flat_text(&chunks, &ReconstructionOptions::default()))
}

/// Score a JSON render produced by [`render::to_json`] or an external tool.
pub fn validate_json(json: &str, expected_pages: Option<usize>) -> Result<ValidationResult> {
    let artifact = JsonArtifact::from_json_str(json)?;
    Ok(QualityValidator::default().validate(&artifact, expected_pages))
}

/// Builder for parsing and rendering OCR responses.
///
/// # Example
///
/// ```
/// use unocr::Unocr;
///
/// let json = r#"[{"type": "logo", "text": "ACME"}, {"text": "Report body"}]"#;
/// let markdown = Unocr::new()
///     .with_frontmatter()
///     .sequential()
///     .parse_str(json)?
///     .to_markdown()?;
/// assert!(markdown.contains("Report body"));
/// assert!(!markdown.contains("ACME"));
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Unocr {
    options: ReconstructionOptions,
    render_options: RenderOptions,
    adapter: Option<Arc<dyn VendorAdapter>>,
    filter: Option<Arc<dyn DecorativeFilter>>,
}

impl Unocr {
    /// Create a new Unocr builder.
    pub fn new() -> Self {
        Self {
            options: ReconstructionOptions::default(),
            render_options: RenderOptions::default(),
            adapter: None,
            filter: None,
        }
    }

    /// Replace all reconstruction options.
    pub fn with_options(mut self, options: ReconstructionOptions) -> Self {
        self.render_options.paragraph_gap_threshold = options.paragraph_gap_threshold;
        self.options = options;
        self
    }

    /// Replace all render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the column gap threshold.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_gap_threshold(threshold);
        self
    }

    /// Set the paragraph gap threshold for ordering and rendering.
    pub fn with_paragraph_gap_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_paragraph_gap_threshold(threshold);
        self.render_options = self.render_options.with_paragraph_gap_threshold(threshold);
        self
    }

    /// Set the font calibration factor.
    pub fn with_calibration_factor(mut self, factor: f32) -> Self {
        self.options = self.options.with_calibration_factor(factor);
        self
    }

    /// Read across columns line by line.
    pub fn row_first(mut self) -> Self {
        self.options = self.options.row_first();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Use a different vendor adapter.
    pub fn with_adapter(mut self, adapter: impl VendorAdapter + 'static) -> Self {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// Use a different decorative-text filter.
    pub fn with_filter(mut self, filter: impl DecorativeFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Parse an OCR response held in a JSON string.
    pub fn parse_str(self, json: &str) -> Result<UnocrResult> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_value(&value)
    }

    /// Parse an OCR response from a reader.
    pub fn parse_reader<R: Read>(self, reader: R) -> Result<UnocrResult> {
        let value: Value = serde_json::from_reader(reader)?;
        self.parse_value(&value)
    }

    /// Parse an already-decoded OCR response.
    pub fn parse_value(self, value: &Value) -> Result<UnocrResult> {
        let parser = self.chunk_parser()?;
        let (chunks, report) = parser.parse_with_report(value)?;
        let document = DocumentAssembler::new(&self.options).assemble_with_report(&chunks, &report);
        Ok(UnocrResult {
            document,
            chunks,
            report,
            options: self.options,
            render_options: self.render_options,
        })
    }

    fn chunk_parser(&self) -> Result<ChunkParser> {
        self.options.validate()?;
        let mut parser = ChunkParser::new(self.options.cleanup.clone())?;
        if let Some(adapter) = &self.adapter {
            parser = parser.with_shared_adapter(Arc::clone(adapter));
        }
        if let Some(filter) = &self.filter {
            parser = parser.with_shared_filter(Arc::clone(filter));
        }
        Ok(parser)
    }
}

impl Default for Unocr {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an OCR response.
pub struct UnocrResult {
    /// The reconstructed document
    pub document: Document,
    chunks: Vec<TextChunk>,
    report: ParseReport,
    options: ReconstructionOptions,
    render_options: RenderOptions,
}

impl UnocrResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text from the reconstructed paragraphs.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Rebuild flat text straight from the parsed chunks.
    pub fn to_flat_text(&self) -> String {
        render::to_flat_text(&self.chunks, &self.options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render to JSON, read the render back and score it.
    ///
    /// The document's own page count is the expected page count.
    pub fn validate(&self, options: ValidatorOptions) -> Result<ValidationResult> {
        let json = self.to_json(JsonFormat::Compact)?;
        let artifact = JsonArtifact::from_json_str(&json)?;
        Ok(QualityValidator::new(options).validate(&artifact, Some(self.document.page_count())))
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Chunks that survived filtering, in input order.
    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    /// Drop statistics from parsing.
    pub fn report(&self) -> &ParseReport {
        &self.report
    }
}
