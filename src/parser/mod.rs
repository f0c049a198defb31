//! OCR chunk parsing and layout reconstruction.

pub mod adapter;
mod assembler;
mod chunk_parser;
mod columns;
mod font;
mod options;
mod reading_order;

pub use adapter::{GroundedAdapter, MarkdownFirstAdapter, RawChunk, VendorAdapter};
pub use assembler::DocumentAssembler;
pub use chunk_parser::{
    is_decorative_kind, ChunkParser, DecorativeFilter, ParseReport, PhraseFilter,
    DECORATIVE_KINDS, VISUAL_PHRASES,
};
pub use columns::{Column, ColumnDetector, ColumnLayout};
pub use font::FontClassifier;
pub use options::{CleanupOptions, FontScale, ReadingOrder, ReconstructionOptions};
pub use reading_order::ReadingOrderSequencer;
