//! Markdown rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, Page, Paragraph, TextType};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
///
/// Titles become `#` headings, subheadings `##` and headings `###`. Body and
/// small text are written as plain paragraphs.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        for page in &doc.pages {
            self.render_page(&mut output, page);
        }

        Ok(output.trim().to_string())
    }

    fn render_page(&self, output: &mut String, page: &Page) {
        for para in &page.paragraphs {
            self.render_paragraph(output, para);
        }
        if !output.ends_with("\n\n") {
            output.push_str("\n\n");
        }
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        if para.text.is_empty() {
            return;
        }

        if let Some(level) = heading_level(para.text_type) {
            output.push_str(&"#".repeat(level));
            output.push(' ');
        }
        output.push_str(&escape_markdown(&para.text));
        output.push_str("\n\n");
    }
}

fn heading_level(text_type: TextType) -> Option<usize> {
    match text_type {
        TextType::LargeTitle | TextType::Title => Some(1),
        TextType::Subheading => Some(2),
        TextType::Heading => Some(3),
        TextType::Body | TextType::Small => None,
    }
}

/// Escape Markdown formatting so paragraph text renders literally.
///
/// Inline emphasis and code characters are escaped everywhere. A leading
/// block marker (`#`, `>`, `-`, `+`, `=` or an ordered-list number) is
/// escaped so body text cannot turn into a heading, quote or list item.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 1);
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    let escape_at = match text.chars().next() {
        Some('#' | '>' | '-' | '+' | '=') => Some(0),
        Some(c) if c.is_ascii_digit() => match text[digits..].chars().next() {
            Some('.' | ')') => Some(digits),
            _ => None,
        },
        _ => None,
    };

    for (i, c) in text.chars().enumerate() {
        if Some(i) == escape_at || matches!(c, '\\' | '`' | '*' | '_') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
