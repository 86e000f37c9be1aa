//! PDF rendering using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use lopdf::Document;
use quick_xml::escape::escape;
use tracing::{debug, trace, warn};

use super::{ConvertOptions, PdfRenderer, RenderFormat, Result};
use crate::error::PdfError;

/// PDF converter backed by lopdf for document structure and pdf-extract for text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfConverter;

/// Rendered content of one PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Number of pages in the source document.
    pub page_count: u32,
    /// Page numbers that were rendered, in document order.
    pub pages: Vec<u32>,
    /// Plain text of the rendered pages, whatever the requested format.
    pub text: String,
    /// The rendering in the requested format.
    pub content: String,
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self
    }

    /// Render a PDF held in memory.
    pub fn render_bytes(&self, data: &[u8], options: &ConvertOptions) -> Result<RenderedDocument> {
        let encoding = options.encoding()?;

        let (doc, password) = load_document(data, options.password.as_deref())?;
        let all_pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if all_pages.is_empty() {
            return Err(PdfError::NoPages);
        }
        let page_count = all_pages.len() as u32;

        let selected = match &options.page_range {
            Some(range) => {
                if let Some(&missing) = range.pages().iter().find(|p| !all_pages.contains(p)) {
                    return Err(PdfError::InvalidPage(missing));
                }
                range.pages().to_vec()
            }
            None => all_pages.clone(),
        };

        let cached = if options.caching {
            Some(extract_pages(data, password.as_deref())?)
        } else {
            None
        };

        let mut texts = Vec::with_capacity(selected.len());
        for &page in &selected {
            let text = match &cached {
                Some(pages) => page_text(pages, page)?,
                None => page_text(&extract_pages(data, password.as_deref())?, page)?,
            };
            trace!("Page {} rendered {} chars", page, text.len());
            texts.push((page, text));
        }

        let text = render_text(&texts);
        let content = match options.format {
            RenderFormat::Text => text.clone(),
            RenderFormat::Html => render_html(&texts, encoding),
            RenderFormat::Xml => render_xml(&texts, encoding),
        };

        debug!(
            "Rendered {}/{} pages as {} ({} chars)",
            selected.len(),
            page_count,
            options.format,
            content.len()
        );

        Ok(RenderedDocument {
            page_count,
            pages: selected,
            text: transcode(text, encoding),
            content: transcode(content, encoding),
        })
    }
}

impl PdfRenderer for PdfConverter {
    fn render(&self, path: &Path, options: &ConvertOptions) -> Result<RenderedDocument> {
        let data = fs::read(path)
            .map_err(|e| PdfError::Parse(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded {} ({} bytes)", path.display(), data.len());
        self.render_bytes(&data, options)
    }
}

/// Parse the document structure. Returns the password that opened it when
/// it needed a non-empty one.
fn load_document(data: &[u8], password: Option<&str>) -> Result<(Document, Option<String>)> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    if !doc.is_encrypted() {
        return Ok((doc, None));
    }

    // Handle PDFs with empty password encryption first
    if doc.decrypt("").is_ok() {
        debug!("Decrypted PDF with empty password");
        return Ok((doc, None));
    }

    match password {
        Some(pw) if !pw.is_empty() && doc.decrypt(pw).is_ok() => {
            debug!("Decrypted PDF with supplied password");
            Ok((doc, Some(pw.to_string())))
        }
        _ => Err(PdfError::Encrypted),
    }
}

/// Text of every page, in page order.
fn extract_pages(data: &[u8], password: Option<&str>) -> Result<Vec<String>> {
    let pages = match password {
        Some(pw) => pdf_extract::extract_text_from_mem_by_pages_encrypted(data, pw),
        None => pdf_extract::extract_text_from_mem_by_pages(data),
    };
    pages.map_err(|e| PdfError::TextExtraction(e.to_string()))
}

/// Page text with a closing newline, so the last line never runs into the page break.
fn page_text(pages: &[String], page: u32) -> Result<String> {
    let raw = pages
        .get(page as usize - 1)
        .ok_or_else(|| PdfError::TextExtraction(format!("page {} could not be extracted", page)))?;

    let mut text = raw.trim_end_matches('\x0c').to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

fn render_text(pages: &[(u32, String)]) -> String {
    let mut out = String::new();
    for (_, text) in pages {
        out.push_str(text);
        out.push('\x0c');
    }
    out
}

fn render_html(pages: &[(u32, String)], encoding: &'static Encoding) -> String {
    let mut out = String::new();
    out.push_str("<html><head>\n");
    out.push_str(&format!(
        "<meta http-equiv=\"Content-Type\" content=\"text/html; charset={}\">\n",
        encoding.name()
    ));
    out.push_str("</head><body>\n");
    for (number, text) in pages {
        out.push_str(&format!("<div class=\"page\" id=\"page{}\">\n", number));
        for line in text.lines() {
            out.push_str(&escape(line));
            out.push_str("<br>\n");
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body></html>\n");
    out
}

fn render_xml(pages: &[(u32, String)], encoding: &'static Encoding) -> String {
    let mut out = format!("<?xml version=\"1.0\" encoding=\"{}\" ?>\n<pages>\n", encoding.name());
    for (number, text) in pages {
        out.push_str(&format!("<page id=\"{}\">\n", number));
        out.push_str(&escape(text.as_str()));
        out.push_str("</page>\n");
    }
    out.push_str("</pages>\n");
    out
}

/// Round-trip through the target encoding so the text only holds representable characters.
fn transcode(text: String, encoding: &'static Encoding) -> String {
    if encoding == encoding_rs::UTF_8 {
        return text;
    }
    let (bytes, _, unmappable) = encoding.encode(&text);
    if unmappable {
        warn!("Some characters are not representable in {}", encoding.name());
    }
    let (decoded, _, _) = encoding.output_encoding().decode(&bytes);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PageRange;
    use crate::test_support::{encrypted_pdf_with_pages, pdf_with_pages};

    fn statement_pdf() -> Vec<u8> {
        pdf_with_pages(&[&["ACCOUNT SUMMARY", "1AB-12345"], &["BOUGHT", "100 SH XYZ CORP"]])
    }

    #[test]
    fn test_render_text_all_pages() {
        let rendered = PdfConverter::new()
            .render_bytes(&statement_pdf(), &ConvertOptions::default())
            .unwrap();

        assert_eq!(rendered.page_count, 2);
        assert_eq!(rendered.pages, vec![1, 2]);
        assert_eq!(rendered.content.matches('\x0c').count(), 2);
        assert_eq!(rendered.text, rendered.content);
        assert!(rendered.content.ends_with("100 SH XYZ CORP\n\x0c"));
        assert!(rendered.content.contains("1AB-12345\n\x0c"));

        let summary = rendered.content.find("ACCOUNT SUMMARY").unwrap();
        let bought = rendered.content.find("BOUGHT").unwrap();
        assert!(summary < bought, "pages must be emitted in document order");
        assert!(rendered.content.contains("XYZ CORP"));
    }

    #[test]
    fn test_render_page_range() {
        let options = ConvertOptions::default().with_page_range("2".parse().unwrap());
        let rendered = PdfConverter::new().render_bytes(&statement_pdf(), &options).unwrap();

        assert_eq!(rendered.pages, vec![2]);
        assert!(rendered.content.contains("BOUGHT"));
        assert!(!rendered.content.contains("ACCOUNT SUMMARY"));
    }

    #[test]
    fn test_render_without_caching_matches_cached() {
        let data = statement_pdf();
        let converter = PdfConverter::new();
        let cached = converter.render_bytes(&data, &ConvertOptions::default()).unwrap();
        let uncached = converter
            .render_bytes(&data, &ConvertOptions { caching: false, ..ConvertOptions::default() })
            .unwrap();

        assert_eq!(cached.content, uncached.content);
    }

    #[test]
    fn test_render_page_out_of_range() {
        let range: PageRange = "3".parse().unwrap();
        let options = ConvertOptions::default().with_page_range(range);
        let err = PdfConverter::new().render_bytes(&statement_pdf(), &options).unwrap_err();

        assert!(matches!(err, PdfError::InvalidPage(3)));
    }

    #[test]
    fn test_render_html_and_xml() {
        let data = pdf_with_pages(&[&["AT&T <CORP>"]]);
        let converter = PdfConverter::new();

        let html = converter
            .render_bytes(&data, &ConvertOptions::default().with_format(RenderFormat::Html))
            .unwrap();
        assert!(html.content.starts_with("<html>"));
        assert!(html.content.contains("<div class=\"page\" id=\"page1\">"));
        assert!(html.content.contains("&amp;"));
        assert!(!html.content.contains("<CORP>"));

        let xml = converter
            .render_bytes(&data, &ConvertOptions::default().with_format(RenderFormat::Xml))
            .unwrap();
        assert!(xml.content.starts_with("<?xml"));
        assert!(xml.content.contains("<page id=\"1\">"));
        assert!(xml.content.trim_end().ends_with("</pages>"));
    }

    #[test]
    fn test_html_keeps_plain_text() {
        let options = ConvertOptions::default().with_format(RenderFormat::Html);
        let rendered = PdfConverter::new().render_bytes(&statement_pdf(), &options).unwrap();

        assert!(rendered.content.contains("100 SH XYZ CORP<br>"));
        assert!(rendered.text.ends_with("BOUGHT\n100 SH XYZ CORP\n\x0c"));
        assert!(!rendered.text.contains("<br>"));
    }

    #[test]
    fn test_password_ignored_for_plain_pdf() {
        let converter = PdfConverter::new();
        let plain = converter
            .render_bytes(&statement_pdf(), &ConvertOptions::default())
            .unwrap();
        let with_password = converter
            .render_bytes(&statement_pdf(), &ConvertOptions::default().with_password("secret"))
            .unwrap();

        assert_eq!(plain.content, with_password.content);
    }

    #[test]
    fn test_encrypted_pdf_needs_password() {
        let data = encrypted_pdf_with_pages(&[&["SOLD", "5 SH ABC"]], "secret");
        let converter = PdfConverter::new();

        let err = converter.render_bytes(&data, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, PdfError::Encrypted));

        let err = converter
            .render_bytes(&data, &ConvertOptions::default().with_password("wrong"))
            .unwrap_err();
        assert!(matches!(err, PdfError::Encrypted));

        let rendered = converter
            .render_bytes(&data, &ConvertOptions::default().with_password("secret"))
            .unwrap();
        assert_eq!(rendered.page_count, 1);
        assert!(rendered.text.contains("SOLD\n5 SH ABC\n\x0c"));
    }

    #[test]
    fn test_render_garbage_fails() {
        let err = PdfConverter::new()
            .render_bytes(b"definitely not a pdf", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_render_missing_file() {
        let err = PdfConverter::new()
            .render(Path::new("/nonexistent/statement.pdf"), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
