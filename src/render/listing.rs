//! Page-by-page text listing for PDF documents.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::model::PdfText;

/// Render the page listing of a PDF.
///
/// The header reports the page count of the whole document; a marker and
/// the page text follow for each extracted page.
pub fn to_listing(pdf: &PdfText) -> String {
    let mut out = String::new();

    // fmt::Write into a String cannot fail
    let _ = writeln!(out, "--- Document Content ({} pages) ---", pdf.page_count());
    for page in &pdf.pages {
        let _ = writeln!(out, "\n--- Page {} ---", page.number);
        let _ = writeln!(out, "{}", page.text);
    }

    out
}

/// Write the page listing of a PDF to `writer`.
pub fn write_listing<W: Write>(pdf: &PdfText, mut writer: W) -> Result<()> {
    writer.write_all(to_listing(pdf).as_bytes())?;
    writer.flush()?;
    Ok(())
}
