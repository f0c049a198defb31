//! Paragraph and text-role types.

use super::{BoundingBox, Positioned, TextChunk};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positioned paragraph with its inferred typographic role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// The text content
    pub text: String,

    /// Zero-based page index
    pub page: u32,

    /// Position on the page
    #[serde(rename = "box")]
    pub bbox: BoundingBox,

    /// Inferred font size in points (None until classified)
    pub font_size: Option<f32>,

    /// Semantic role derived from the font size
    pub text_type: TextType,

    /// Column index (0 = leftmost)
    pub column: usize,

    /// Vertical distance to the previous paragraph in the same column
    pub vertical_gap_before: f32,
}

impl Paragraph {
    /// Create an unclassified paragraph from a parsed chunk.
    pub fn from_chunk(chunk: &TextChunk) -> Self {
        Self::new(chunk.text(), chunk.page(), *chunk.bbox())
    }

    /// Create an unclassified paragraph.
    pub fn new(text: impl Into<String>, page: u32, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            page,
            bbox,
            font_size: None,
            text_type: TextType::default(),
            column: 0,
            vertical_gap_before: 0.0,
        }
    }

    /// Check whether the gap above this paragraph marks a paragraph break.
    pub fn starts_paragraph(&self, gap_threshold: f32) -> bool {
        self.vertical_gap_before > gap_threshold
    }

    /// Check if this is any kind of heading or title.
    pub fn is_heading(&self) -> bool {
        self.text_type.is_heading()
    }

    /// Check if a font size has been assigned.
    pub fn is_classified(&self) -> bool {
        self.font_size.is_some()
    }
}

impl Positioned for Paragraph {
    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}

/// Typographic role bucket, ordered from smallest to largest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    /// Footnotes, captions, fine print
    Small,
    /// Running text
    #[default]
    Body,
    /// Section heading
    Heading,
    /// Larger heading below a title
    Subheading,
    /// Document or chapter title
    Title,
    /// Cover-page size title
    LargeTitle,
}

impl TextType {
    /// All variants, smallest first.
    pub const ALL: [TextType; 6] = [
        TextType::Small,
        TextType::Body,
        TextType::Heading,
        TextType::Subheading,
        TextType::Title,
        TextType::LargeTitle,
    ];

    /// Snake-case name as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextType::Small => "small",
            TextType::Body => "body",
            TextType::Heading => "heading",
            TextType::Subheading => "subheading",
            TextType::Title => "title",
            TextType::LargeTitle => "large_title",
        }
    }

    pub fn is_heading(&self) -> bool {
        !matches!(self, TextType::Small | TextType::Body)
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
