//! Document assembly: per-page reconstruction joined into a [`Document`].

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::chunk_parser::ParseReport;
use super::columns::ColumnDetector;
use super::font::FontClassifier;
use super::options::ReconstructionOptions;
use super::reading_order::ReadingOrderSequencer;
use crate::model::{Document, Metadata, Page, Paragraph, TextChunk};

/// Builds a [`Document`] from parsed chunks.
///
/// Each page is reconstructed on its own: columns are detected, paragraphs
/// are put into reading order, and font sizes are classified. Pages have no
/// dependency on one another and run on the rayon pool when the options
/// allow it; the output is always in ascending page order.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    detector: ColumnDetector,
    sequencer: ReadingOrderSequencer,
    classifier: FontClassifier,
    parallel: bool,
}

impl DocumentAssembler {
    /// Create an assembler from reconstruction options.
    pub fn new(options: &ReconstructionOptions) -> Self {
        Self {
            detector: ColumnDetector::new(options.gap_threshold),
            sequencer: ReadingOrderSequencer::new(options.order, options.paragraph_gap_threshold),
            classifier: FontClassifier::new(options.font.clone()),
            parallel: options.parallel,
        }
    }

    /// Assemble a document. Every chunk counts as a source record.
    pub fn assemble(&self, chunks: &[TextChunk]) -> Document {
        let report = ParseReport {
            source_count: chunks.len(),
            ..Default::default()
        };
        self.assemble_with_report(chunks, &report)
    }

    /// Assemble a document, recording provenance from a parse report.
    pub fn assemble_with_report(&self, chunks: &[TextChunk], report: &ParseReport) -> Document {
        let mut by_page: BTreeMap<u32, Vec<Paragraph>> = BTreeMap::new();
        for chunk in chunks {
            by_page
                .entry(chunk.page())
                .or_default()
                .push(Paragraph::from_chunk(chunk));
        }

        let groups: Vec<(u32, Vec<Paragraph>)> = by_page.into_iter().collect();
        let pages: Vec<Page> = if self.parallel && groups.len() > 1 {
            groups
                .into_par_iter()
                .map(|(number, paragraphs)| self.build_page(number, paragraphs))
                .collect()
        } else {
            groups
                .into_iter()
                .map(|(number, paragraphs)| self.build_page(number, paragraphs))
                .collect()
        };

        let mut metadata = Metadata {
            source_chunk_count: report.source_count,
            dropped_chunk_count: report.dropped(),
            ..Default::default()
        };
        metadata.tally(&pages);

        let document = Document { metadata, pages };
        if document.is_empty() {
            log::warn!(
                "Reconstruction produced no paragraphs from {} source chunks",
                report.source_count
            );
        }
        document
    }

    /// Reconstruct a single page.
    pub fn build_page(&self, number: u32, mut paragraphs: Vec<Paragraph>) -> Page {
        let columns = self.detector.assign(&mut paragraphs);
        self.sequencer.sequence(&mut paragraphs);
        self.classifier.classify_all(&mut paragraphs);

        log::debug!(
            "Page {}: {} paragraphs in {} columns",
            number,
            paragraphs.len(),
            columns
        );
        if paragraphs.is_empty() {
            log::warn!("Page {} has no paragraphs", number);
        }

        Page {
            number,
            paragraphs,
            columns,
            width: None,
            height: None,
        }
    }

    /// The column detector in use.
    pub fn detector(&self) -> &ColumnDetector {
        &self.detector
    }

    /// The reading-order sequencer in use.
    pub fn sequencer(&self) -> &ReadingOrderSequencer {
        &self.sequencer
    }

    /// The font classifier in use.
    pub fn classifier(&self) -> &FontClassifier {
        &self.classifier
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(&ReconstructionOptions::default())
    }
}
