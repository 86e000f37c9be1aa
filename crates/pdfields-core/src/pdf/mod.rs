//! PDF rendering module.

mod converter;

pub use converter::{PdfConverter, RenderedDocument};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Textual representation a PDF is rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Plain text, one form feed after each page.
    Text,
    /// Minimal HTML document, one div per page.
    Html,
    /// XML document, one page element per page.
    Xml,
}

impl RenderFormat {
    /// File extension used when persisting this rendering.
    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Text => "txt",
            RenderFormat::Html => "html",
            RenderFormat::Xml => "xml",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(RenderFormat::Text),
            "html" => Ok(RenderFormat::Html),
            "xml" => Ok(RenderFormat::Xml),
            other => Err(PdfError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderFormat::Text => "text",
            RenderFormat::Html => "html",
            RenderFormat::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// A set of 1-indexed page numbers, e.g. "1-3,5".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pages: Vec<u32>,
}

impl PageRange {
    /// Selected pages in ascending order.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }
}

impl FromStr for PageRange {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PdfError::InvalidPageRange(s.to_string());
        let mut pages = Vec::new();

        for part in s.split(',').map(str::trim) {
            if part.is_empty() {
                return Err(invalid());
            }
            let (start, end) = match part.split_once('-') {
                Some((a, b)) => (a.trim(), b.trim()),
                None => (part, part),
            };
            let start: u32 = start.parse().map_err(|_| invalid())?;
            let end: u32 = end.parse().map_err(|_| invalid())?;
            if start == 0 || end < start {
                return Err(invalid());
            }
            pages.extend(start..=end);
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(Self { pages })
    }
}

/// Per-call rendering options.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Output representation.
    pub format: RenderFormat,
    /// Pages to render (None = every page).
    pub page_range: Option<PageRange>,
    /// Reuse the parsed document for each page instead of re-parsing the source bytes.
    pub caching: bool,
    /// Password tried after the empty password on encrypted documents.
    pub password: Option<String>,
    /// Encoding label the rendered text is expressed in.
    pub character_encoding: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: RenderFormat::Text,
            page_range: None,
            caching: true,
            password: None,
            character_encoding: "utf-8".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_page_range(mut self, range: PageRange) -> Self {
        self.page_range = Some(range);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Resolve the configured encoding label.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.character_encoding.trim().as_bytes())
            .ok_or_else(|| PdfError::UnsupportedEncoding(self.character_encoding.clone()))
    }
}

/// Trait for PDF-to-text implementations.
pub trait PdfRenderer {
    /// Render every selected page of the file at `path`.
    fn render(&self, path: &Path, options: &ConvertOptions) -> Result<RenderedDocument>;
}
