//! PDF text extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;
use rayon::prelude::*;

use crate::detect::{detect_format_from_path, detect_pdf_from_bytes, DocumentFormat};
use crate::error::{Error, Result};
use crate::model::{PageText, PdfMetadata, PdfText};

use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        match detect_format_from_path(path)? {
            DocumentFormat::Pdf(format) => log::debug!("Opening {} ({})", path.display(), format),
            DocumentFormat::Docx => return Err(Error::UnknownFormat),
        }

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::IO(io) => Error::from_open(io, path),
            other => Error::from(other),
        })?;

        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_pdf_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Extract the text of every selected page.
    ///
    /// Pages are returned in ascending order regardless of whether they were
    /// extracted in parallel.
    pub fn parse(&self) -> Result<PdfText> {
        let mut result = PdfText::new();
        result.metadata = self.extract_metadata();

        let page_numbers: Vec<u32> = self
            .doc
            .get_pages()
            .into_keys()
            .filter(|n| self.options.pages.includes(*n))
            .collect();

        let extracted: Vec<Result<PageText>> = if self.options.parallel && page_numbers.len() > 1 {
            page_numbers
                .par_iter()
                .map(|&n| self.parse_page(n))
                .collect()
        } else {
            page_numbers.iter().map(|&n| self.parse_page(n)).collect()
        };

        for page in extracted {
            result.add_page(page?);
        }

        log::debug!(
            "Extracted {} of {} pages",
            result.pages.len(),
            result.page_count()
        );

        Ok(result)
    }

    /// Extract a single page, applying the error mode.
    ///
    /// lopdf yields empty text for missing or undecodable content streams,
    /// so failures here are mostly structural (bad page tree, out of range).
    fn parse_page(&self, page_num: u32) -> Result<PageText> {
        match self.extract_page_text(page_num) {
            Ok(text) => Ok(PageText::new(page_num, text)),
            Err(e) => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!("Failed to extract text from page {}: {}", page_num, e);
                Ok(PageText::failed(page_num, e.to_string()))
            }
        }
    }

    /// Extract text from one page.
    pub fn extract_page_text(&self, page_num: u32) -> Result<String> {
        let page_count = self.page_count();
        if page_num == 0 || page_num > page_count {
            return Err(Error::PageOutOfRange(page_num, page_count));
        }

        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::PageExtract {
                page: page_num,
                reason: e.to_string(),
            })
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> PdfMetadata {
        let mut metadata = PdfMetadata::with_version(self.version());
        metadata.page_count = self.page_count();
        metadata.encrypted = self.doc.is_encrypted();

        let info_dict = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(|info| info.as_reference())
            .and_then(|info_ref| self.doc.get_dictionary(info_ref));

        if let Ok(info_dict) = info_dict {
            metadata.title = get_string_from_dict(info_dict, b"Title");
            metadata.author = get_string_from_dict(info_dict, b"Author");
            metadata.creator = get_string_from_dict(info_dict, b"Creator");
            metadata.producer = get_string_from_dict(info_dict, b"Producer");
            metadata.created =
                get_string_from_dict(info_dict, b"CreationDate").and_then(|d| parse_pdf_date(&d));
            metadata.modified =
                get_string_from_dict(info_dict, b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
