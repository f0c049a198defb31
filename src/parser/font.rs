//! Font size inference from box geometry.
//!
//! OCR output carries no font metadata, so the point size is estimated from
//! the normalized box height: `height * calibration_factor`, clamped to the
//! configured range and rounded to the nearest half point. The estimate is
//! then bucketed into a [`TextType`].

use super::options::FontScale;
use crate::model::{Paragraph, TextType};

/// Infers font sizes and text roles.
#[derive(Debug, Clone, PartialEq)]
pub struct FontClassifier {
    scale: FontScale,
}

impl FontClassifier {
    /// Create a classifier from a font scale.
    pub fn new(scale: FontScale) -> Self {
        Self { scale }
    }

    /// The font scale in use.
    pub fn scale(&self) -> &FontScale {
        &self.scale
    }

    /// Estimate a point size from a normalized box height.
    pub fn estimate_size(&self, height: f32) -> f32 {
        let raw = height * self.scale.calibration_factor;
        // max/min instead of clamp: an inverted or NaN range must not panic.
        let clamped = if raw.is_finite() {
            raw.max(self.scale.min_size()).min(self.scale.max_size)
        } else {
            self.scale.min_size()
        };
        (clamped * 2.0).round() / 2.0
    }

    /// Bucket a point size. Lower bounds are inclusive.
    pub fn classify_size(&self, size: f32) -> TextType {
        let s = &self.scale;
        if size >= s.large_title_min {
            TextType::LargeTitle
        } else if size >= s.title_min {
            TextType::Title
        } else if size >= s.subheading_min {
            TextType::Subheading
        } else if size >= s.heading_min {
            TextType::Heading
        } else if size >= s.body_min {
            TextType::Body
        } else {
            TextType::Small
        }
    }

    /// Set `font_size` and `text_type` on a paragraph.
    pub fn classify(&self, paragraph: &mut Paragraph) {
        let size = self.estimate_size(paragraph.bbox.height());
        paragraph.font_size = Some(size);
        paragraph.text_type = self.classify_size(size);
    }

    /// Classify every paragraph in a slice.
    pub fn classify_all(&self, paragraphs: &mut [Paragraph]) {
        for paragraph in paragraphs {
            self.classify(paragraph);
        }
    }
}

impl Default for FontClassifier {
    fn default() -> Self {
        Self::new(FontScale::default())
    }
}
