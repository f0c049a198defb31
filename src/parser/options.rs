//! Reconstruction options and configuration.
//!
//! Every tuning constant the pipeline uses lives here and is passed in by
//! the caller. Options can be built in code or deserialized from JSON; any
//! field left out takes its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for reconstructing a document from OCR chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionOptions {
    /// Horizontal `center_x` gap that starts a new column (fraction of page width)
    pub gap_threshold: f32,

    /// Vertical gap that marks a paragraph break (fraction of page height)
    pub paragraph_gap_threshold: f32,

    /// How paragraphs are flattened into a reading sequence
    pub order: ReadingOrder,

    /// Whether to reconstruct pages in parallel
    pub parallel: bool,

    /// Font size inference constants
    pub font: FontScale,

    /// Chunk text cleanup
    pub cleanup: CleanupOptions,
}

impl ReconstructionOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON document, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Set the column gap threshold.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = threshold;
        self
    }

    /// Set the paragraph gap threshold.
    pub fn with_paragraph_gap_threshold(mut self, threshold: f32) -> Self {
        self.paragraph_gap_threshold = threshold;
        self
    }

    /// Set the reading order.
    pub fn with_order(mut self, order: ReadingOrder) -> Self {
        self.order = order;
        self
    }

    /// Read rows across columns instead of whole columns.
    pub fn row_first(mut self) -> Self {
        self.order = ReadingOrder::RowFirst;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the font scale.
    pub fn with_font_scale(mut self, font: FontScale) -> Self {
        self.font = font;
        self
    }

    /// Set the height-to-points calibration factor.
    pub fn with_calibration_factor(mut self, factor: f32) -> Self {
        self.font.calibration_factor = factor;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("gap_threshold", self.gap_threshold)?;
        check_non_negative("paragraph_gap_threshold", self.paragraph_gap_threshold)?;
        self.font.validate()?;
        self.cleanup.validate()
    }
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        Self {
            gap_threshold: 0.2,
            paragraph_gap_threshold: 0.05,
            order: ReadingOrder::ColumnFirst,
            parallel: true,
            font: FontScale::default(),
            cleanup: CleanupOptions::default(),
        }
    }
}

/// Order in which a two-dimensional page is flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingOrder {
    /// Finish each column top to bottom before moving right
    #[default]
    ColumnFirst,
    /// Read across columns line by line
    RowFirst,
}

/// Constants for inferring point sizes from box heights.
///
/// The calibration factor was fit against a single observed document and
/// usually needs retuning per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontScale {
    /// Points per unit of normalized box height
    pub calibration_factor: f32,

    /// Nominal body size; the estimate never drops below 70% of it
    pub base_size: f32,

    /// Largest size an estimate may reach
    pub max_size: f32,

    /// Lower bound of the body bucket
    pub body_min: f32,

    /// Lower bound of the heading bucket
    pub heading_min: f32,

    /// Lower bound of the subheading bucket
    pub subheading_min: f32,

    /// Lower bound of the title bucket
    pub title_min: f32,

    /// Lower bound of the large title bucket
    pub large_title_min: f32,
}

impl FontScale {
    /// Smallest size an estimate may take.
    pub fn min_size(&self) -> f32 {
        self.base_size * 0.7
    }

    /// Set the calibration factor.
    pub fn with_calibration_factor(mut self, factor: f32) -> Self {
        self.calibration_factor = factor;
        self
    }

    /// Set the base and maximum sizes.
    pub fn with_size_range(mut self, base_size: f32, max_size: f32) -> Self {
        self.base_size = base_size;
        self.max_size = max_size;
        self
    }

    /// Check that the constants are finite, positive and ascending.
    pub fn validate(&self) -> Result<()> {
        if !(self.calibration_factor.is_finite() && self.calibration_factor > 0.0) {
            return Err(Error::InvalidOptions(format!(
                "calibration_factor must be a positive number, got {}",
                self.calibration_factor
            )));
        }
        check_non_negative("base_size", self.base_size)?;
        if !(self.max_size.is_finite() && self.max_size >= self.min_size()) {
            return Err(Error::InvalidOptions(format!(
                "max_size {} is below the minimum size {}",
                self.max_size,
                self.min_size()
            )));
        }

        let bounds = [
            ("body_min", self.body_min),
            ("heading_min", self.heading_min),
            ("subheading_min", self.subheading_min),
            ("title_min", self.title_min),
            ("large_title_min", self.large_title_min),
        ];
        for (name, value) in bounds {
            check_non_negative(name, value)?;
        }
        for pair in bounds.windows(2) {
            if pair[1].1 < pair[0].1 {
                return Err(Error::InvalidOptions(format!(
                    "{} ({}) must not be below {} ({})",
                    pair[1].0, pair[1].1, pair[0].0, pair[0].1
                )));
            }
        }
        Ok(())
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            calibration_factor: 400.0,
            base_size: 11.0,
            max_size: 48.0,
            body_min: 10.0,
            heading_min: 13.0,
            subheading_min: 18.0,
            title_min: 24.0,
            large_title_min: 36.0,
        }
    }
}

/// Options for cleaning chunk text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupOptions {
    /// Marker opening an inline description of a visual element
    pub annotation_open: String,

    /// Marker closing an inline description
    pub annotation_close: String,

    /// Remove HTML-style tags such as anchors
    pub strip_html_tags: bool,

    /// Remove `[...]` comment spans
    pub strip_brackets: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,
}

impl CleanupOptions {
    fn validate(&self) -> Result<()> {
        if self.annotation_open.is_empty() || self.annotation_close.is_empty() {
            return Err(Error::InvalidOptions(
                "annotation markers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            annotation_open: "<::".to_string(),
            annotation_close: "::>".to_string(),
            strip_html_tags: true,
            strip_brackets: true,
            normalize_unicode: true,
        }
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidOptions(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}
