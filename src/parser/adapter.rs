//! Vendor adapters that normalize raw OCR records.
//!
//! OCR providers disagree on field names: some put the recognized text in
//! `text`, others in `markdown`. An adapter maps one raw record onto
//! [`RawChunk`] so the chunk parser only ever sees a single shape.

use serde_json::{Map, Value};

use crate::model::BoundingBox;

/// A raw record after vendor normalization, before cleaning and filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChunk {
    /// Vendor type tag (e.g. `text`, `logo`, `chunkFigure`)
    pub kind: Option<String>,
    /// Unprocessed text or markdown
    pub text: Option<String>,
    /// Zero-based page index, if the grounding carried a valid one
    pub page: Option<u32>,
    /// Bounding box, if the grounding carried all four edges
    pub bbox: Option<BoundingBox>,
}

/// Maps one vendor record onto the canonical raw shape.
pub trait VendorAdapter: Send + Sync {
    /// Adapter name for diagnostics.
    fn name(&self) -> &str;

    /// Normalize one record.
    fn adapt(&self, record: &Map<String, Value>) -> RawChunk;
}

/// Adapter for grounded chunk records that prefer `text` over `markdown`.
///
/// ```json
/// {"type": "text", "text": "...", "grounding": {"page": 0,
///   "box": {"left": 0.1, "top": 0.1, "right": 0.9, "bottom": 0.2}}}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundedAdapter;

impl VendorAdapter for GroundedAdapter {
    fn name(&self) -> &str {
        "grounded"
    }

    fn adapt(&self, record: &Map<String, Value>) -> RawChunk {
        adapt_grounded(record, &["text", "markdown"])
    }
}

/// Adapter for vendors whose `markdown` field is the authoritative text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFirstAdapter;

impl VendorAdapter for MarkdownFirstAdapter {
    fn name(&self) -> &str {
        "markdown-first"
    }

    fn adapt(&self, record: &Map<String, Value>) -> RawChunk {
        adapt_grounded(record, &["markdown", "text"])
    }
}

fn adapt_grounded(record: &Map<String, Value>, text_fields: &[&str]) -> RawChunk {
    let kind = record
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);

    let text = text_fields
        .iter()
        .filter_map(|field| record.get(*field).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string);

    let grounding = record.get("grounding").and_then(Value::as_object);
    let page = grounding.and_then(|g| g.get("page")).and_then(read_page);
    let bbox = grounding
        .and_then(|g| g.get("box"))
        .and_then(Value::as_object)
        .and_then(read_box);

    RawChunk {
        kind,
        text,
        page,
        bbox,
    }
}

fn read_page(value: &Value) -> Option<u32> {
    let page = value.as_u64().and_then(|p| u32::try_from(p).ok());
    if page.is_none() && !value.is_null() {
        log::warn!("Ignoring invalid page value {}, using page 0", value);
    }
    page
}

fn read_box(object: &Map<String, Value>) -> Option<BoundingBox> {
    let edge = |name: &str| object.get(name).and_then(Value::as_f64).map(|v| v as f32);

    match (edge("left"), edge("top"), edge("right"), edge("bottom")) {
        (Some(left), Some(top), Some(right), Some(bottom)) => {
            Some(BoundingBox::new(left, top, right, bottom))
        }
        _ => {
            log::debug!("Partial bounding box, falling back to full page");
            None
        }
    }
}
