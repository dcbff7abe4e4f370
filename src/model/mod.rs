//! Document model types.
//!
//! Read-only representations of what the parsers extract: the body
//! structure of a word-processing document and the per-page text of a PDF.

mod document;
mod page;
mod paragraph;
mod table;

pub use document::{DocxDocument, DocxMetadata};
pub use page::{PageText, PdfMetadata, PdfText};
pub use paragraph::{Paragraph, Section};
pub use table::{Table, TableCell, TableRow, VerticalMerge};
