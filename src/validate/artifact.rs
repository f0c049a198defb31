//! Read-back access to rendered output.

use serde_json::Value;

use crate::error::Result;

/// A rendered artifact the validator can inspect.
///
/// Implementations read whatever the renderer actually produced rather than
/// the in-memory model, so a regression in rendering shows up in the score.
pub trait RenderedArtifact {
    /// Every font size found in the artifact, in document order.
    fn font_sizes(&self) -> Vec<f32>;

    /// Number of pages found in the artifact.
    fn page_count(&self) -> usize;
}

/// Font sizes collected by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSamples {
    sizes: Vec<f32>,
    pages: usize,
}

impl FontSamples {
    /// Create a sample set from sizes and a page count.
    pub fn new(sizes: Vec<f32>, pages: usize) -> Self {
        Self { sizes, pages }
    }

    /// Append `count` samples of one size.
    pub fn with_repeated(mut self, size: f32, count: usize) -> Self {
        self.sizes.extend(std::iter::repeat(size).take(count));
        self
    }
}

impl RenderedArtifact for FontSamples {
    fn font_sizes(&self) -> Vec<f32> {
        self.sizes.clone()
    }

    fn page_count(&self) -> usize {
        self.pages
    }
}

/// A JSON render read back as an untyped value.
///
/// Sizes are taken from `pages[*].paragraphs[*].font_size`; paragraphs with
/// a missing or non-numeric size are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArtifact {
    value: Value,
}

impl JsonArtifact {
    /// Parse a JSON render.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    /// Wrap an already parsed JSON render.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    fn pages(&self) -> &[Value] {
        self.value
            .get("pages")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl RenderedArtifact for JsonArtifact {
    fn font_sizes(&self) -> Vec<f32> {
        self.pages()
            .iter()
            .filter_map(|page| page.get("paragraphs").and_then(Value::as_array))
            .flatten()
            .filter_map(|para| para.get("font_size").and_then(Value::as_f64))
            .map(|size| size as f32)
            .collect()
    }

    fn page_count(&self) -> usize {
        self.pages().len()
    }
}
