//! DOCX document converter implementation.

use crate::error::Result;
use crate::model::DocxDocument;
use crate::parser::DocxParser;
use crate::render::{to_json, to_report, JsonFormat};
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// DOCX document converter.
///
/// Converts DOCX documents to the content report or JSON.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new DOCX converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_document(&self, doc: &DocxDocument, options: &ConvertOptions) -> Result<ConvertResult> {
        let content = match options.output_format {
            OutputFormat::Text => to_report(doc),
            OutputFormat::Json => to_json(doc, JsonFormat::Pretty)?,
        };
        Ok(ConvertResult::new(content, options.output_format))
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = DocxParser::open(path)?.parse()?;
        self.convert_document(&doc, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = DocxParser::from_bytes(bytes)?.parse()?;
        self.convert_document(&doc, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_converter_extensions() {
        let converter = DocxConverter::new();
        assert_eq!(converter.supported_extensions(), &["docx"]);
        assert!(converter.supports_extension("DOCX"));
        assert!(!converter.supports_extension("pdf"));
        assert_eq!(converter.name(), "docx");
    }

    #[test]
    fn test_convert_document_formats() {
        let converter = DocxConverter::new();
        let mut doc = DocxDocument::new();
        doc.push_paragraph("Hello");

        let text = converter
            .convert_document(&doc, &ConvertOptions::default())
            .unwrap();
        assert_eq!(text.mime_type, "text/plain");
        assert!(text.content.contains("[1] Hello\n"));

        let json = converter
            .convert_document(&doc, &ConvertOptions::new().with_format(OutputFormat::Json))
            .unwrap();
        assert_eq!(json.mime_type, "application/json");
        assert!(json.content.contains("\"paragraphs\""));
    }
}
