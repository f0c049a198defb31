//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Options for rendering a reconstructed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata (Markdown only)
    pub include_frontmatter: bool,

    /// Vertical gap above which a blank line separates paragraphs
    pub paragraph_gap_threshold: f32,

    /// Emit `[Column Break]` between columns of multi-column pages
    pub mark_columns: bool,

    /// Emit `--- Page Break ---` between pages
    pub mark_pages: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the paragraph gap threshold.
    pub fn with_paragraph_gap_threshold(mut self, threshold: f32) -> Self {
        self.paragraph_gap_threshold = threshold;
        self
    }

    /// Enable or disable column-break markers.
    pub fn with_column_markers(mut self, mark: bool) -> Self {
        self.mark_columns = mark;
        self
    }

    /// Enable or disable page-break markers.
    pub fn with_page_markers(mut self, mark: bool) -> Self {
        self.mark_pages = mark;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            paragraph_gap_threshold: 0.05,
            mark_columns: true,
            mark_pages: true,
        }
    }
}
