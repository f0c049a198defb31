//! Chunk parsing: raw OCR records to cleaned text chunks.
//!
//! The parser runs every record through a [`VendorAdapter`], cleans the
//! text, and drops anything that describes a visual element instead of
//! carrying prose. Decorative content is recognized two ways: by the
//! vendor's type tag, and for plain text chunks by a [`DecorativeFilter`]
//! that looks for visual-description vocabulary.

use std::io::Read;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use super::adapter::{GroundedAdapter, RawChunk, VendorAdapter};
use super::options::CleanupOptions;
use crate::error::{Error, Result};
use crate::model::{BoundingBox, TextChunk};

/// Type tags (normalized) that always denote a non-prose element.
pub const DECORATIVE_KINDS: [&str; 11] = [
    "logo",
    "scancode",
    "attestation",
    "figure",
    "image",
    "barcode",
    "border",
    "decorative",
    "graphic",
    "icon",
    "signature",
];

/// Phrases that describe visual elements rather than document prose.
pub const VISUAL_PHRASES: [&str; 20] = [
    "logo",
    "stamp",
    "seal",
    "signature",
    "signed by",
    "emblem",
    "watermark",
    "qr code",
    "barcode",
    "bar code",
    "ornament",
    "ornamental",
    "decorative",
    "border",
    "crest",
    "insignia",
    "coat of arms",
    "letterhead",
    "illustration",
    "icon",
];

/// Decides whether a text chunk is really a description of a visual element.
pub trait DecorativeFilter: Send + Sync {
    /// Return true if the cleaned text should be dropped.
    fn is_decorative(&self, text: &str) -> bool;
}

/// Phrase-vocabulary filter.
///
/// Text is decorative when it matches at least `min_matches` distinct
/// phrases, or at least one phrase while being shorter than
/// `short_text_limit` characters. Phrases match whole words,
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct PhraseFilter {
    phrases: Vec<Regex>,
    min_matches: usize,
    short_text_limit: usize,
}

impl PhraseFilter {
    /// Build a filter from a phrase vocabulary.
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|phrase| {
                let pattern = format!(r"\b{}\b", regex::escape(phrase.as_ref().trim()));
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::InvalidOptions(format!("bad phrase pattern: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            phrases,
            min_matches: 2,
            short_text_limit: 200,
        })
    }

    /// Set how many distinct phrases mark any text as decorative.
    pub fn with_min_matches(mut self, count: usize) -> Self {
        self.min_matches = count.max(1);
        self
    }

    /// Set the length below which a single phrase is enough.
    pub fn with_short_text_limit(mut self, chars: usize) -> Self {
        self.short_text_limit = chars;
        self
    }

    /// Count the distinct phrases found in the text.
    pub fn match_count(&self, text: &str) -> usize {
        self.phrases.iter().filter(|re| re.is_match(text)).count()
    }
}

impl Default for PhraseFilter {
    fn default() -> Self {
        Self::new(VISUAL_PHRASES).expect("built-in phrases are escaped literals")
    }
}

impl DecorativeFilter for PhraseFilter {
    fn is_decorative(&self, text: &str) -> bool {
        let matches = self.match_count(text);
        matches >= self.min_matches
            || (matches >= 1 && text.chars().count() < self.short_text_limit)
    }
}

/// Counts collected while parsing one response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Records in the input
    pub source_count: usize,
    /// Records dropped as decorative
    pub dropped_decorative: usize,
    /// Records dropped because no text remained after cleaning
    pub dropped_empty: usize,
}

impl ParseReport {
    /// Total number of dropped records.
    pub fn dropped(&self) -> usize {
        self.dropped_decorative + self.dropped_empty
    }
}

/// Parses raw OCR records into cleaned [`TextChunk`]s.
#[derive(Clone)]
pub struct ChunkParser {
    adapter: Arc<dyn VendorAdapter>,
    filter: Arc<dyn DecorativeFilter>,
    annotation_regex: Regex,
    html_tag_regex: Regex,
    bracket_regex: Regex,
    whitespace_regex: Regex,
    options: CleanupOptions,
}

impl ChunkParser {
    /// Create a parser with the default adapter and phrase filter.
    pub fn new(options: CleanupOptions) -> Result<Self> {
        let annotation = format!(
            r"(?s){}.*?{}",
            regex::escape(&options.annotation_open),
            regex::escape(&options.annotation_close)
        );
        let annotation_regex = Regex::new(&annotation)
            .map_err(|e| Error::InvalidOptions(format!("bad annotation markers: {}", e)))?;

        Ok(Self {
            adapter: Arc::new(GroundedAdapter),
            filter: Arc::new(PhraseFilter::default()),
            annotation_regex,
            html_tag_regex: Regex::new(r"</?[A-Za-z][^<>]*>").unwrap(),
            bracket_regex: Regex::new(r"\[[^\[\]]*\]").unwrap(),
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            options,
        })
    }

    /// Use a different vendor adapter.
    pub fn with_adapter(mut self, adapter: impl VendorAdapter + 'static) -> Self {
        self.adapter = Arc::new(adapter);
        self
    }

    /// Use a different decorative-text filter.
    pub fn with_filter(mut self, filter: impl DecorativeFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub(crate) fn with_shared_adapter(mut self, adapter: Arc<dyn VendorAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    pub(crate) fn with_shared_filter(mut self, filter: Arc<dyn DecorativeFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Name of the active vendor adapter.
    pub fn adapter_name(&self) -> &str {
        self.adapter.name()
    }

    /// Parse a JSON string holding an array of records.
    pub fn parse_str(&self, json: &str) -> Result<Vec<TextChunk>> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_value(&value)
    }

    /// Parse records from a reader.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<TextChunk>> {
        let value: Value = serde_json::from_reader(reader)?;
        self.parse_value(&value)
    }

    /// Parse an already-decoded JSON value.
    pub fn parse_value(&self, input: &Value) -> Result<Vec<TextChunk>> {
        self.parse_with_report(input).map(|(chunks, _)| chunks)
    }

    /// Parse and also return drop statistics.
    pub fn parse_with_report(&self, input: &Value) -> Result<(Vec<TextChunk>, ParseReport)> {
        let records = input.as_array().ok_or_else(|| {
            Error::InvalidInputShape(format!(
                "expected an array of records, got {}",
                json_type_name(input)
            ))
        })?;

        let mut report = ParseReport {
            source_count: records.len(),
            ..Default::default()
        };
        let mut chunks = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                Error::InvalidInputShape(format!(
                    "record {} is {}, expected an object",
                    index,
                    json_type_name(record)
                ))
            })?;

            let raw = self.adapter.adapt(object);
            match self.convert(raw) {
                Outcome::Kept(chunk) => chunks.push(chunk),
                Outcome::Decorative => {
                    log::trace!("Dropped decorative record {}", index);
                    report.dropped_decorative += 1;
                }
                Outcome::Empty => {
                    log::trace!("Dropped empty record {}", index);
                    report.dropped_empty += 1;
                }
            }
        }

        log::debug!(
            "Parsed {} chunks from {} records ({} decorative, {} empty)",
            chunks.len(),
            report.source_count,
            report.dropped_decorative,
            report.dropped_empty
        );

        Ok((chunks, report))
    }

    /// Clean one piece of raw chunk text.
    pub fn clean_text(&self, raw: &str) -> String {
        let mut text = self.annotation_regex.replace_all(raw, " ").into_owned();

        if self.options.strip_html_tags {
            text = self.html_tag_regex.replace_all(&text, " ").into_owned();
        }
        if self.options.strip_brackets {
            text = self.bracket_regex.replace_all(&text, " ").into_owned();
        }
        if self.options.normalize_unicode {
            text = text.nfc().collect();
        }

        self.whitespace_regex
            .replace_all(&text, " ")
            .trim()
            .to_string()
    }

    fn convert(&self, raw: RawChunk) -> Outcome {
        if raw.kind.as_deref().is_some_and(is_decorative_kind) {
            return Outcome::Decorative;
        }

        let text = raw
            .text
            .as_deref()
            .map(|t| self.clean_text(t))
            .unwrap_or_default();
        if text.is_empty() {
            return Outcome::Empty;
        }

        if is_text_kind(raw.kind.as_deref()) && self.filter.is_decorative(&text) {
            return Outcome::Decorative;
        }

        Outcome::Kept(TextChunk::new(
            text,
            raw.page.unwrap_or(0),
            raw.bbox.unwrap_or_else(BoundingBox::full_page),
            raw.kind,
        ))
    }
}

impl Default for ChunkParser {
    fn default() -> Self {
        // Default markers are non-empty literals and always compile.
        Self::new(CleanupOptions::default()).unwrap()
    }
}

enum Outcome {
    Kept(TextChunk),
    Decorative,
    Empty,
}

/// Normalize a vendor type tag: lowercase, separators removed, `chunk` prefix dropped.
fn normalize_kind(kind: &str) -> String {
    let flat: String = kind
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' ' | '.'))
        .flat_map(char::to_lowercase)
        .collect();
    match flat.strip_prefix("chunk") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => flat,
    }
}

/// Check whether a type tag names a decorative category.
pub fn is_decorative_kind(kind: &str) -> bool {
    let normalized = normalize_kind(kind);
    DECORATIVE_KINDS.contains(&normalized.as_str())
}

fn is_text_kind(kind: Option<&str>) -> bool {
    match kind {
        None => true,
        Some(kind) => {
            let normalized = normalize_kind(kind);
            normalized.is_empty() || normalized == "text"
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
