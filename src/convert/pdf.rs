//! PDF document converter implementation.

use crate::error::Result;
use crate::model::PdfText;
use crate::parser::PdfParser;
use crate::render::{to_json, to_listing, JsonFormat};
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// PDF document converter.
///
/// Converts PDF documents to the page listing or JSON. Pages that fail in
/// lenient mode are reported as warnings on the result.
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    _private: (),
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_document(&self, pdf: &PdfText, options: &ConvertOptions) -> Result<ConvertResult> {
        let content = match options.output_format {
            OutputFormat::Text => to_listing(pdf),
            OutputFormat::Json => to_json(pdf, JsonFormat::Pretty)?,
        };

        let result = pdf
            .pages
            .iter()
            .filter_map(|page| {
                page.error
                    .as_ref()
                    .map(|err| format!("page {}: {}", page.number, err))
            })
            .fold(ConvertResult::new(content, options.output_format), |result, warning| {
                result.with_warning(warning)
            });

        Ok(result)
    }
}

impl DocumentConverter for PdfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = PdfParser::open_with_options(path, options.parse.clone())?;
        let pdf = parser.parse()?;
        self.convert_document(&pdf, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = PdfParser::from_bytes_with_options(bytes, options.parse.clone())?;
        let pdf = parser.parse()?;
        self.convert_document(&pdf, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageText;

    #[test]
    fn test_pdf_converter_extensions() {
        let converter = PdfConverter::new();
        assert_eq!(converter.supported_extensions(), &["pdf"]);
        assert!(converter.supports_extension("pdf"));
        assert!(converter.supports_extension("PDF"));
        assert!(!converter.supports_extension("docx"));
    }

    #[test]
    fn test_failed_pages_become_warnings() {
        let converter = PdfConverter::new();
        let mut pdf = PdfText::new();
        pdf.metadata.page_count = 2;
        pdf.add_page(PageText::new(1, "fine"));
        pdf.add_page(PageText::failed(2, "unknown filter"));

        let result = converter
            .convert_document(&pdf, &ConvertOptions::default())
            .unwrap();
        assert_eq!(result.warnings, vec!["page 2: unknown filter".to_string()]);
        assert!(result.content.starts_with("--- Document Content (2 pages) ---\n"));
    }
}
