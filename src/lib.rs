//! # doctext
//!
//! Text extraction from word-processing documents and PDFs.
//!
//! Two extractors are provided:
//!
//! - **DOCX**: paragraphs, tables and sections of a `.docx` package,
//!   rendered as a plain-text content report.
//! - **PDF**: the text of each page, rendered as a page-by-page listing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doctext::{parse_pdf, render, write_docx_report};
//!
//! fn main() -> doctext::Result<()> {
//!     // Write the content report of a DOCX file
//!     let doc = write_docx_report("Labax.docx", "docx_content.txt")?;
//!     println!("{} paragraphs", doc.paragraph_count());
//!
//!     // List the text of every PDF page
//!     let pdf = parse_pdf("manual.pdf")?;
//!     print!("{}", render::to_listing(&pdf));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `docx` (default): DOCX support through `zip` and `quick-xml`
//! - `pdf` (default): PDF support through `lopdf`, with parallel page
//!   extraction through `rayon`
//!
//! Entry points for a format whose feature is disabled return
//! [`Error::MissingBackend`].

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, OutputFormat,
};
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_docx_bytes, is_pdf, is_pdf_bytes,
    DocumentFormat, PdfFormat,
};
pub use error::{Error, Result};
pub use model::{
    DocxDocument, DocxMetadata, PageText, Paragraph, PdfMetadata, PdfText, Section, Table,
    TableCell, TableRow, VerticalMerge,
};
pub use parser::{ErrorMode, PageSelection, ParseOptions};
pub use render::JsonFormat;

#[cfg(feature = "docx")]
pub use parser::DocxParser;
#[cfg(feature = "pdf")]
pub use parser::PdfParser;

use std::path::Path;

/// Default DOCX input, relative to the working directory.
pub const DEFAULT_DOCX_INPUT: &str = "Labax.docx";

/// Default report output, relative to the working directory.
pub const DEFAULT_REPORT_OUTPUT: &str = "docx_content.txt";

/// Environment variable the CLI reads the PDF path from.
pub const PDF_PATH_ENV: &str = "DOCTEXT_PDF";

/// Parse a DOCX file.
///
/// # Example
///
/// ```no_run
/// use doctext::parse_docx;
///
/// let doc = parse_docx("Labax.docx").unwrap();
/// println!("Tables: {}", doc.table_count());
/// ```
#[cfg(feature = "docx")]
pub fn parse_docx<P: AsRef<Path>>(path: P) -> Result<DocxDocument> {
    DocxParser::open(path)?.parse()
}

/// Parse a DOCX file.
#[cfg(not(feature = "docx"))]
pub fn parse_docx<P: AsRef<Path>>(_path: P) -> Result<DocxDocument> {
    Err(Error::MissingBackend("docx"))
}

/// Parse a DOCX package from bytes.
#[cfg(feature = "docx")]
pub fn parse_docx_bytes(data: &[u8]) -> Result<DocxDocument> {
    DocxParser::from_bytes(data)?.parse()
}

/// Parse a DOCX package from bytes.
#[cfg(not(feature = "docx"))]
pub fn parse_docx_bytes(_data: &[u8]) -> Result<DocxDocument> {
    Err(Error::MissingBackend("docx"))
}

/// Parse `input` and write its content report to `output`.
///
/// The output file is created or truncated only after the input parsed
/// successfully. Returns the parsed document.
///
/// # Example
///
/// ```no_run
/// use doctext::{write_docx_report, DEFAULT_DOCX_INPUT, DEFAULT_REPORT_OUTPUT};
///
/// write_docx_report(DEFAULT_DOCX_INPUT, DEFAULT_REPORT_OUTPUT)?;
/// # Ok::<(), doctext::Error>(())
/// ```
pub fn write_docx_report<P, Q>(input: P, output: Q) -> Result<DocxDocument>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let doc = parse_docx(input)?;

    let output = output.as_ref();
    let file = std::fs::File::create(output)?;
    render::write_report(&doc, std::io::BufWriter::new(file))?;
    log::debug!("Wrote report to {}", output.display());

    Ok(doc)
}

/// Extract the text of every page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use doctext::parse_pdf;
///
/// let pdf = parse_pdf("document.pdf").unwrap();
/// println!("Pages: {}", pdf.page_count());
/// ```
pub fn parse_pdf<P: AsRef<Path>>(path: P) -> Result<PdfText> {
    parse_pdf_with_options(path, ParseOptions::default())
}

/// Extract PDF text with custom options.
///
/// # Example
///
/// ```no_run
/// use doctext::{parse_pdf_with_options, PageSelection, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=3));
/// let pdf = parse_pdf_with_options("document.pdf", options).unwrap();
/// ```
#[cfg(feature = "pdf")]
pub fn parse_pdf_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<PdfText> {
    PdfParser::open_with_options(path, options)?.parse()
}

/// Extract PDF text with custom options.
#[cfg(not(feature = "pdf"))]
pub fn parse_pdf_with_options<P: AsRef<Path>>(_path: P, _options: ParseOptions) -> Result<PdfText> {
    Err(Error::MissingBackend("pdf"))
}

/// Extract PDF text from bytes.
#[cfg(feature = "pdf")]
pub fn parse_pdf_bytes(data: &[u8]) -> Result<PdfText> {
    PdfParser::from_bytes(data)?.parse()
}

/// Extract PDF text from bytes.
#[cfg(not(feature = "pdf"))]
pub fn parse_pdf_bytes(_data: &[u8]) -> Result<PdfText> {
    Err(Error::MissingBackend("pdf"))
}
