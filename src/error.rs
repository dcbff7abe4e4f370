//! Error types for doctext library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doctext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting document text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file format is not recognized.
    #[error("Unknown file format: not a valid DOCX or PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The DOCX container (ZIP archive) could not be read.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Malformed XML inside a DOCX part.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required part is missing from the DOCX package.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text extraction failed for a single page.
    #[error("Text extraction failed on page {page}: {reason}")]
    PageExtract {
        /// Page number (1-indexed)
        page: u32,
        /// Reason reported by the backend
        reason: String,
    },

    /// Some pages could not be extracted; the rest were.
    #[error("Text extraction failed on {} of {page_count} pages ({})", .failed_pages.len(), join_pages(.failed_pages))]
    PartialExtraction {
        /// Pages whose text could not be extracted
        failed_pages: Vec<u32>,
        /// Total number of pages in the document
        page_count: u32,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Support for a format was not compiled in.
    #[error("{0} support is not available: rebuild with the `{0}` feature enabled")]
    MissingBackend(&'static str),

    /// Error during rendering (report, listing, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Map an I/O error on `path` to `NotFound` when the file is missing.
    pub(crate) fn from_open(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path.into())
        } else {
            Error::Io(err)
        }
    }
}

#[cfg(feature = "docx")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Archive(err.to_string()),
        }
    }
}

#[cfg(feature = "docx")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_partial_extraction_display() {
        let err = Error::PartialExtraction {
            failed_pages: vec![2, 4],
            page_count: 5,
        };
        assert_eq!(
            err.to_string(),
            "Text extraction failed on 2 of 5 pages (2, 4)"
        );
    }

    #[test]
    fn test_missing_backend_display() {
        let err = Error::MissingBackend("pdf");
        assert!(err.to_string().contains("`pdf` feature"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_open_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = Error::from_open(io_err, "missing.pdf");
        assert!(matches!(err, Error::NotFound(ref p) if p == &PathBuf::from("missing.pdf")));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(Error::from_open(io_err, "x"), Error::Io(_)));
    }
}
