//! Document parsing module.

mod options;

#[cfg(feature = "docx")]
mod docx_parser;
#[cfg(feature = "pdf")]
mod pdf_parser;

pub use options::{ErrorMode, PageSelection, ParseOptions, MAX_LISTED_PAGES};

#[cfg(feature = "docx")]
pub use docx_parser::DocxParser;
#[cfg(feature = "pdf")]
pub use pdf_parser::PdfParser;
