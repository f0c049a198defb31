//! Rendering module for converting reconstructed output to text formats.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::{to_flat_text, to_text, COLUMN_BREAK, PAGE_BREAK};
