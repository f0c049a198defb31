//! Reading-order sequencing and paragraph-break detection.

use std::cmp::Ordering;

use super::options::ReadingOrder;
use crate::model::{Paragraph, Positioned, TextChunk};

/// Orders paragraphs into a single reading sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingOrderSequencer {
    order: ReadingOrder,
    paragraph_gap_threshold: f32,
}

impl ReadingOrderSequencer {
    /// Create a sequencer.
    pub fn new(order: ReadingOrder, paragraph_gap_threshold: f32) -> Self {
        Self {
            order,
            paragraph_gap_threshold,
        }
    }

    /// The configured ordering.
    pub fn order(&self) -> ReadingOrder {
        self.order
    }

    /// The configured paragraph gap threshold.
    pub fn paragraph_gap_threshold(&self) -> f32 {
        self.paragraph_gap_threshold
    }

    /// Sort paragraphs into reading order and record the vertical gaps.
    ///
    /// Columns must already be assigned.
    pub fn sequence(&self, paragraphs: &mut [Paragraph]) {
        self.sort(paragraphs);
        self.record_gaps(paragraphs);
    }

    /// Stable sort by `(column, top)` or `(top, column)`.
    pub fn sort(&self, paragraphs: &mut [Paragraph]) {
        match self.order {
            ReadingOrder::ColumnFirst => paragraphs.sort_by(|a, b| {
                a.column
                    .cmp(&b.column)
                    .then_with(|| cmp_f32(a.bbox.top, b.bbox.top))
            }),
            ReadingOrder::RowFirst => paragraphs.sort_by(|a, b| {
                cmp_f32(a.bbox.top, b.bbox.top).then_with(|| a.column.cmp(&b.column))
            }),
        }
    }

    /// Store `top - previous.bottom` for each paragraph, per column.
    ///
    /// The first paragraph of a column gets a gap of zero.
    pub fn record_gaps(&self, paragraphs: &mut [Paragraph]) {
        let mut last_bottom: Vec<Option<f32>> = Vec::new();
        for paragraph in paragraphs.iter_mut() {
            if last_bottom.len() <= paragraph.column {
                last_bottom.resize(paragraph.column + 1, None);
            }
            let slot = &mut last_bottom[paragraph.column];
            paragraph.vertical_gap_before = match *slot {
                Some(bottom) => paragraph.bbox.top - bottom,
                None => 0.0,
            };
            *slot = Some(paragraph.bbox.bottom);
        }
    }

    /// Check whether a vertical gap counts as a paragraph break.
    pub fn is_break(&self, gap: f32) -> bool {
        gap > self.paragraph_gap_threshold
    }

    /// Rebuild one column (or a single-column page) as text lines.
    ///
    /// Fragments are sorted by `(top, left)`. A blank line is emitted
    /// before any fragment whose top sits more than the paragraph gap
    /// below the previous fragment's bottom.
    pub fn column_lines<'a>(&self, chunks: &[&'a TextChunk]) -> Vec<&'a str> {
        let mut sorted: Vec<&TextChunk> = chunks.to_vec();
        sorted.sort_by(|a, b| {
            cmp_f32(a.bbox().top, b.bbox().top).then_with(|| cmp_f32(a.bbox().left, b.bbox().left))
        });

        let mut lines = Vec::with_capacity(sorted.len());
        let mut previous_bottom: Option<f32> = None;
        for chunk in sorted {
            if let Some(bottom) = previous_bottom {
                if self.is_break(chunk.bbox().top - bottom) {
                    lines.push("");
                }
            }
            lines.push(chunk.text());
            previous_bottom = Some(chunk.bbox().bottom);
        }
        lines
    }

    /// Rebuild one column as a single string.
    pub fn column_text(&self, chunks: &[&TextChunk]) -> String {
        self.column_lines(chunks).join("\n")
    }
}

impl Default for ReadingOrderSequencer {
    fn default() -> Self {
        Self::new(ReadingOrder::ColumnFirst, 0.05)
    }
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
