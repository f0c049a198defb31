//! Page-level types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A single reconstructed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (zero-based, as reported by the grounding data)
    pub number: u32,

    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,

    /// Number of detected columns
    pub columns: usize,

    /// Page width, when known
    pub width: Option<f32>,

    /// Page height, when known
    pub height: Option<f32>,
}

impl Page {
    /// Create a new empty single-column page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            paragraphs: Vec::new(),
            columns: 1,
            width: None,
            height: None,
        }
    }

    /// Set the physical page dimensions.
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Add a paragraph to the page.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Get the number of paragraphs on the page.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the page has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Iterate over the paragraphs of one column, in stored order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(move |p| p.column == index)
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
