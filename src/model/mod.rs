//! Document model types for reconstructed OCR content.
//!
//! This module defines the intermediate representation that bridges chunk
//! parsing and rendering: normalized geometry, cleaned chunks, classified
//! paragraphs, pages and documents.

mod chunk;
mod document;
mod geometry;
mod page;
mod paragraph;

pub use chunk::TextChunk;
pub use document::{Document, Metadata};
pub use geometry::{BoundingBox, Positioned};
pub use page::Page;
pub use paragraph::{Paragraph, TextType};
