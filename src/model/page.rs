//! PDF text types.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text extracted from a PDF document, page by page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfText {
    /// Document metadata (version, page count, info dictionary)
    pub metadata: PdfMetadata,

    /// Extracted pages in ascending page order
    pub pages: Vec<PageText>,
}

impl PdfText {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of pages in the source document.
    pub fn page_count(&self) -> u32 {
        self.metadata.page_count
    }

    /// Get an extracted page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageText> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageText) {
        self.pages.push(page);
    }

    /// Page numbers whose extraction failed.
    pub fn failed_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|p| p.is_failed())
            .map(|p| p.number)
            .collect()
    }

    /// Return [`Error::PartialExtraction`] if any page failed.
    pub fn ensure_complete(&self) -> Result<()> {
        let failed_pages = self.failed_pages();
        if failed_pages.is_empty() {
            Ok(())
        } else {
            Err(Error::PartialExtraction {
                failed_pages,
                page_count: self.page_count(),
            })
        }
    }

    /// Concatenated text of all extracted pages.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Text of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted text (empty when nothing could be extracted)
    pub text: String,

    /// Extraction error, recorded in lenient mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageText {
    /// Create a page with extracted text.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            error: None,
        }
    }

    /// Create a page whose extraction failed.
    pub fn failed(number: u32, error: impl Into<String>) -> Self {
        Self {
            number,
            text: String::new(),
            error: Some(error.into()),
        }
    }

    /// Check if extraction failed for this page.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// PDF document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfMetadata {
    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,

    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl PdfMetadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}
