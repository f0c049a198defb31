//! Document-level types.

use super::{Page, Paragraph, TextType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reconstructed multi-page document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Provenance and summary counts
    pub metadata: Metadata,

    /// Pages in ascending page order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by its page number.
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has no paragraphs at all.
    ///
    /// An empty document is legitimate when every chunk was decorative.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Iterate over every paragraph in reading order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.pages.iter().flat_map(|p| p.paragraphs.iter())
    }

    /// Total number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(Page::paragraph_count).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Records received from the OCR provider
    pub source_chunk_count: usize,

    /// Records dropped as decorative or empty
    pub dropped_chunk_count: usize,

    /// Number of pages with content
    pub page_count: usize,

    /// Number of paragraphs across all pages
    pub paragraph_count: usize,

    /// Paragraph count per text type
    pub text_type_counts: BTreeMap<TextType, usize>,
}

impl Metadata {
    /// Recompute the summary counts from a set of pages.
    pub fn tally(&mut self, pages: &[Page]) {
        self.page_count = pages.len();
        self.paragraph_count = pages.iter().map(Page::paragraph_count).sum();
        self.text_type_counts.clear();
        for paragraph in pages.iter().flat_map(|p| &p.paragraphs) {
            *self
                .text_type_counts
                .entry(paragraph.text_type)
                .or_insert(0) += 1;
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("source_chunks: {}", self.source_chunk_count));
        lines.push(format!("dropped_chunks: {}", self.dropped_chunk_count));
        lines.push(format!("pages: {}", self.page_count));
        lines.push(format!("paragraphs: {}", self.paragraph_count));
        if !self.text_type_counts.is_empty() {
            lines.push("text_types:".to_string());
            for (text_type, count) in &self.text_type_counts {
                lines.push(format!("  {}: {}", text_type, count));
            }
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}
