//! Source document rendering.
//!
//! A renderer turns a source document into page-ordered linear text. The
//! extraction stages only ever see a [`RenderedDocument`].

#[cfg(feature = "pdf")]
mod pdf;
mod text;

#[cfg(feature = "pdf")]
pub use pdf::PdfRenderer;
pub use text::{TextFileRenderer, PAGE_SEPARATOR};

use std::path::Path;

use tracing::debug;

use crate::error::{RenderError, Result, ShipxError};

/// Page-ordered text of one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub pages: Vec<String>,
}

impl RenderedDocument {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with newlines.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }

    /// Text of the first page, empty for a document without pages.
    pub fn first_page(&self) -> &str {
        self.pages.first().map_or("", String::as_str)
    }

    /// Lines of the first `max_pages` pages.
    pub fn sample_lines(&self, max_pages: usize) -> impl Iterator<Item = &str> {
        self.pages.iter().take(max_pages).flat_map(|page| page.lines())
    }
}

/// Trait for source document renderers.
pub trait TextRenderer: Send + Sync {
    /// Render an in-memory document.
    fn render_bytes(&self, data: &[u8]) -> std::result::Result<RenderedDocument, RenderError>;

    /// Read and render the document at `path`.
    fn render(&self, path: &Path) -> Result<RenderedDocument> {
        let data = read_input(path)?;
        Ok(self.render_bytes(&data)?)
    }
}

/// Renderer choosing the format from the file extension.
///
/// `.pdf` files go through [`PdfRenderer`] and `.txt` files through
/// [`TextFileRenderer`]. In-memory documents are recognized by the PDF magic
/// bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn new() -> Self {
        Self
    }

    fn for_extension(extension: &str) -> std::result::Result<&'static dyn TextRenderer, RenderError> {
        match extension.to_ascii_lowercase().as_str() {
            #[cfg(feature = "pdf")]
            "pdf" => Ok(&PdfRenderer),
            #[cfg(not(feature = "pdf"))]
            "pdf" => Err(RenderError::UnsupportedFormat(
                "pdf (built without the pdf feature)".to_string(),
            )),
            "txt" | "text" => Ok(&TextFileRenderer),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl TextRenderer for DocumentRenderer {
    fn render_bytes(&self, data: &[u8]) -> std::result::Result<RenderedDocument, RenderError> {
        let extension = if data.starts_with(b"%PDF") { "pdf" } else { "txt" };
        Self::for_extension(extension)?.render_bytes(data)
    }

    fn render(&self, path: &Path) -> Result<RenderedDocument> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let renderer = Self::for_extension(&extension)?;

        let data = read_input(path)?;
        debug!("Rendering {} ({} bytes)", path.display(), data.len());
        Ok(renderer.render_bytes(&data)?)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ShipxError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
