//! PDF text rendering using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::RenderError;

use super::{RenderedDocument, TextRenderer};

/// Renders each PDF page to linear text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Load the document, decrypting it if it only has an empty user password.
    ///
    /// Returns the bytes pdf-extract should read and the page count.
    fn prepare(data: &[u8]) -> Result<(Vec<u8>, usize), RenderError> {
        let mut doc = Document::load_mem(data).map_err(|e| RenderError::Parse(e.to_string()))?;

        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(RenderError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| RenderError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(RenderError::NoPages);
        }
        Ok((raw, page_count))
    }
}

impl TextRenderer for PdfRenderer {
    fn render_bytes(&self, data: &[u8]) -> Result<RenderedDocument, RenderError> {
        let (raw, page_count) = Self::prepare(data)?;
        debug!("Loaded PDF with {} pages", page_count);

        let pages = pdf_extract::extract_text_from_mem_by_pages(&raw)
            .map_err(|e| RenderError::TextExtraction(e.to_string()))?;

        debug!(
            "Extracted {} chars of text from {} pages",
            pages.iter().map(String::len).sum::<usize>(),
            pages.len()
        );
        Ok(RenderedDocument::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf() {
        assert!(matches!(
            PdfRenderer.render_bytes(b"not a pdf"),
            Err(RenderError::Parse(_))
        ));
    }
}
