//! Canonical text fragments produced by the chunk parser.

use super::{BoundingBox, Positioned};
use serde::{Deserialize, Serialize};

/// A cleaned, non-decorative OCR fragment.
///
/// Chunks are only built by [`ChunkParser`](crate::parser::ChunkParser);
/// the fields are read through accessors afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    text: String,
    page: u32,
    bbox: BoundingBox,
    kind: Option<String>,
}

impl TextChunk {
    pub(crate) fn new(
        text: String,
        page: u32,
        bbox: BoundingBox,
        kind: Option<String>,
    ) -> Self {
        Self {
            text,
            page,
            bbox,
            kind,
        }
    }

    /// Cleaned text (never empty).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Zero-based page index from the grounding data.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Vendor type tag, if the record carried one.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl Positioned for TextChunk {
    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}
