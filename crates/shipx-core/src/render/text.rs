//! Pre-rendered text input.

use crate::error::RenderError;

use super::{RenderedDocument, TextRenderer};

/// Separates pages of a pre-rendered text file.
pub const PAGE_SEPARATOR: char = '\u{000C}';

/// Renderer for documents that were already linearized to UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileRenderer;

impl TextRenderer for TextFileRenderer {
    fn render_bytes(&self, data: &[u8]) -> Result<RenderedDocument, RenderError> {
        let text = std::str::from_utf8(data).map_err(|e| RenderError::Parse(e.to_string()))?;
        let text = text.replace("\r\n", "\n");

        let pages: Vec<String> = text.split(PAGE_SEPARATOR).map(str::to_string).collect();
        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(RenderError::NoPages);
        }
        Ok(RenderedDocument::new(pages))
    }
}
