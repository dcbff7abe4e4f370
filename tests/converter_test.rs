//! Integration tests for the converter module.

mod common;

use std::path::Path;
use std::sync::Arc;
use doctext::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat, PdfConverter,
};
use doctext::error::Result;
use doctext::{Error, ParseOptions};

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, _path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted by {}", self.name),
            options.output_format,
        ))
    }

    fn convert_bytes(&self, _bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted bytes by {}", self.name),
            options.output_format,
        ))
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("pdf"));
    assert!(!registry.supports("docx"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_converter_registry_with_defaults() {
    let registry = ConverterRegistry::with_defaults();

    assert!(registry.supports("pdf"));
    assert!(registry.supports("PDF")); // Case insensitive
    assert!(registry.supports("docx"));
    assert!(registry.supports("DocX"));
    assert!(!registry.supports("doc"));
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    let converter = Arc::new(MockConverter::new(vec!["txt", "text"], "text"));

    registry.register(converter);

    assert!(registry.supports("txt"));
    assert!(registry.supports("text"));
    assert!(registry.supports("TXT")); // Case insensitive
}

#[test]
fn test_converter_registry_get_by_extension() {
    let registry = ConverterRegistry::with_defaults();

    assert_eq!(registry.get_by_extension("pdf").unwrap().name(), "pdf");
    assert_eq!(registry.get_by_extension("DOCX").unwrap().name(), "docx"); // Case insensitive
    assert!(registry.get_by_extension("unknown").is_none());
}

#[test]
fn test_later_registration_wins() {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(MockConverter::new(vec!["docx", "odt"], "word")));

    assert_eq!(registry.get_by_extension("docx").unwrap().name(), "word");
    assert_eq!(registry.get_by_extension("pdf").unwrap().name(), "pdf");

    let result = registry
        .convert(Path::new("notes.ODT"), &ConvertOptions::default())
        .unwrap();
    assert_eq!(result.content, "Converted by word");
}

#[test]
fn test_dispatch_by_extension_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!("{}{}", common::paragraph("Upper"), common::table(&[&["k", "v"]]));
    let docx = common::write_file(dir.path(), "REPORT.DOCX", &common::docx(&body));
    let pdf = common::write_file(dir.path(), "Scan.Pdf", &common::pdf(&["scanned"]));

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::default();

    let report = registry.convert(&docx, &options).unwrap();
    assert_eq!(report.mime_type, "text/plain");
    assert!(report.content.contains("[1] Upper\n"));
    assert!(report.content.contains("\nTable 1:\nk | v\n"));

    let listing = registry.convert(&pdf, &options).unwrap();
    assert!(listing.content.starts_with("--- Document Content (1 pages) ---\n"));
    assert!(listing.content.contains("scanned"));
    assert!(listing.warnings.is_empty());
}

#[test]
fn test_convert_bytes_to_json() {
    let options = ConvertOptions::new().with_format(OutputFormat::Json);

    let result = DocxConverter::new()
        .convert_bytes(&common::docx(&common::paragraph("json me")), &options)
        .unwrap();
    assert_eq!(result.mime_type, "application/json");

    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["paragraphs"][0]["text"], "json me");
    assert_eq!(value["paragraphs"][0]["index"], 1);

    let result = PdfConverter::new()
        .convert_bytes(&common::pdf(&["p1", "p2"]), &options)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["metadata"]["page_count"], 2);
    assert_eq!(value["pages"].as_array().unwrap().len(), 2);
}

#[test]
fn test_convert_respects_parse_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_file(dir.path(), "three.pdf", &common::pdf(&["one", "two", "three"]));

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_parse_options(
        ParseOptions::new().with_pages(doctext::PageSelection::Pages(vec![2])),
    );

    let result = registry.convert(&path, &options).unwrap();
    assert!(result.content.contains("--- Page 2 ---"));
    assert!(!result.content.contains("--- Page 1 ---"));
    assert!(!result.content.contains("--- Page 3 ---"));
}

#[test]
fn test_unsupported_extension() {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(Path::new("slides.pptx"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::Other(_))));
}

#[test]
fn test_missing_file_through_registry() {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(Path::new("missing/Labax.docx"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_converter_names() {
    assert_eq!(DocxConverter::new().name(), "docx");
    assert_eq!(PdfConverter::new().name(), "pdf");
    assert!(DocxConverter::new().supports_extension("DOCX"));
    assert!(!PdfConverter::new().supports_extension("docx"));
}
