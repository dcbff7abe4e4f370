//! DOCX document parser using zip and quick-xml.
//!
//! A DOCX file is a ZIP package. The main part (normally
//! `word/document.xml`) holds the body: paragraphs (`w:p`), tables
//! (`w:tbl`) and section properties (`w:sectPr`). Only the direct children
//! of `w:body` count as body paragraphs and tables, which mirrors the
//! object model word processors expose to scripts.

use std::io::{Cursor, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::is_docx_bytes;
use crate::error::{Error, Result};
use crate::model::{DocxDocument, DocxMetadata, Section, Table, TableCell, TableRow, VerticalMerge};

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const CORE_PROPERTIES: &str = "docProps/core.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// `w:sectPr` inside the properties of a body paragraph.
const PARAGRAPH_SECTION: &[&[u8]] = &[b"body", b"p", b"pPr"];

/// DOCX document parser.
pub struct DocxParser {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::from_open(e, path))?;
        Self::from_vec(data)
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Parse a DOCX package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data)
    }

    fn from_vec(data: Vec<u8>) -> Result<Self> {
        if !is_docx_bytes(&data) {
            return Err(Error::UnknownFormat);
        }
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Parse the package and return the document body.
    pub fn parse(&mut self) -> Result<DocxDocument> {
        let main_part = self.main_part_name()?;
        log::debug!("DOCX main part: {}", main_part);

        let xml = self
            .read_part(&main_part)?
            .ok_or_else(|| Error::MissingPart(main_part.clone()))?;

        let mut document = BodyWalker::default().walk(strip_bom(&xml))?;

        match self.read_part(CORE_PROPERTIES) {
            Ok(Some(core)) => match parse_core_properties(strip_bom(&core)) {
                Ok(metadata) => document.metadata = metadata,
                Err(e) => log::warn!("Ignoring unreadable core properties: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring unreadable core properties: {}", e),
        }

        log::debug!(
            "Parsed DOCX: {} paragraphs, {} tables, {} sections",
            document.paragraph_count(),
            document.table_count(),
            document.section_count()
        );

        Ok(document)
    }

    /// Names of all parts in the package.
    pub fn part_names(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Locate the main document part through the package relationships.
    fn main_part_name(&mut self) -> Result<String> {
        let rels = match self.read_part(PACKAGE_RELS)? {
            Some(rels) => rels,
            None => return Ok(DEFAULT_MAIN_PART.to_string()),
        };

        let mut reader = Reader::from_str(strip_bom(&rels));
        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let is_main = get_attribute(e, b"Type")
                        .map(|t| t.ends_with(OFFICE_DOCUMENT_REL))
                        .unwrap_or(false);
                    if is_main {
                        if let Some(target) = get_attribute(e, b"Target") {
                            return Ok(target.trim_start_matches('/').to_string());
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(DEFAULT_MAIN_PART.to_string())
    }

    /// Read a part as text, or `None` if the package does not contain it.
    fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(Some(content))
    }
}

/// Where the paragraph being collected ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphTarget {
    Body,
    Cell,
}

/// Table under construction.
#[derive(Debug, Default)]
struct TableBuilder {
    table: Table,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

impl TableBuilder {
    fn finish_cell(&mut self) {
        if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
            row.cells.push(cell);
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take() {
            self.table.add_row(row);
        }
    }
}

/// Event-driven walk over the main document part.
#[derive(Debug, Default)]
struct BodyWalker {
    document: DocxDocument,
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    /// Stack depth at which an ignored subtree started.
    skip_from: Option<usize>,
    paragraph: Option<(ParagraphTarget, String)>,
    in_text: bool,
    table: Option<TableBuilder>,
    /// Open section and the stack depth of its `sectPr`.
    section: Option<(usize, Section)>,
}

impl BodyWalker {
    fn walk(mut self, xml: &str) -> Result<DocxDocument> {
        let mut reader = Reader::from_str(xml);
        reader.expand_empty_elements(true);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => self.start(e),
                Event::End(_) => self.end(),
                Event::Text(ref e) => {
                    if self.collecting_text() {
                        let text = e.unescape()?;
                        self.push_text(&text);
                    }
                }
                Event::CData(ref e) => {
                    if self.collecting_text() {
                        let text = String::from_utf8_lossy(e);
                        self.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(self.document)
    }

    fn parent(&self) -> Option<&[u8]> {
        self.stack.last().map(Vec::as_slice)
    }

    /// Check that the open elements end with `names`.
    fn ends_with(&self, names: &[&[u8]]) -> bool {
        self.stack.len() >= names.len()
            && self.stack[self.stack.len() - names.len()..]
                .iter()
                .zip(names)
                .all(|(open, name)| open.as_slice() == *name)
    }

    fn in_cell(&self) -> bool {
        self.table.as_ref().is_some_and(|t| t.cell.is_some())
    }

    fn collecting_text(&self) -> bool {
        self.in_text && self.skip_from.is_none() && self.paragraph.is_some()
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, buffer)) = self.paragraph.as_mut() {
            buffer.push_str(text);
        }
    }

    fn skip_subtree(&mut self) {
        self.skip_from = Some(self.stack.len());
    }

    fn start(&mut self, e: &BytesStart) {
        let name = e.local_name().as_ref().to_vec();

        if self.skip_from.is_none() {
            self.open_element(&name, e);
        }

        self.stack.push(name);
    }

    fn open_element(&mut self, name: &[u8], e: &BytesStart) {
        let parent = self.parent().unwrap_or_default();
        let (in_body, in_run) = (parent == b"body", parent == b"r");
        let (in_tc, in_tc_pr) = (parent == b"tc", parent == b"tcPr");

        match name {
            b"p" => {
                if self.paragraph.is_some() {
                    // Paragraph nested in a shape or text box
                    self.skip_subtree();
                } else if in_body {
                    self.paragraph = Some((ParagraphTarget::Body, String::new()));
                } else if in_tc && self.in_cell() {
                    self.paragraph = Some((ParagraphTarget::Cell, String::new()));
                }
            }
            b"txbxContent" => self.skip_subtree(),
            b"tbl" => {
                if self.table.is_some() {
                    // Nested tables belong to neither the body nor the cell text
                    self.skip_subtree();
                } else if in_body {
                    self.table = Some(TableBuilder::default());
                }
            }
            b"tr" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_row();
                    table.row = Some(TableRow::default());
                }
            }
            b"tc" => {
                if let Some(table) = self.table.as_mut() {
                    if table.row.is_some() {
                        table.finish_cell();
                        table.cell = Some(TableCell::empty());
                    }
                }
            }
            b"gridSpan" | b"vMerge" if in_tc_pr => {
                let value = get_attribute(e, b"val");
                if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
                    if name == b"gridSpan" {
                        cell.grid_span = value
                            .and_then(|v| v.trim().parse::<u16>().ok())
                            .unwrap_or(1)
                            .max(1);
                    } else {
                        cell.v_merge = match value.as_deref() {
                            None | Some("continue") => VerticalMerge::Continue,
                            Some("restart") => VerticalMerge::Restart,
                            Some(_) => VerticalMerge::None,
                        };
                    }
                }
            }
            b"sectPr" => {
                if self.section.is_none() && (in_body || self.ends_with(PARAGRAPH_SECTION)) {
                    self.section = Some((self.stack.len(), Section::default()));
                }
            }
            b"pgSz" => {
                // Only the open section's own page size, not a tracked revision
                let depth = self.stack.len();
                if let Some((_, section)) = self.section.as_mut().filter(|(d, _)| d + 1 == depth) {
                    section.page_width = get_attribute(e, b"w").and_then(|v| v.parse().ok());
                    section.page_height = get_attribute(e, b"h").and_then(|v| v.parse().ok());
                    section.landscape = get_attribute(e, b"orient").as_deref() == Some("landscape");
                }
            }
            b"t" if in_run => self.in_text = self.paragraph.is_some(),
            b"tab" | b"ptab" if in_run => self.push_text("\t"),
            b"cr" if in_run => self.push_text("\n"),
            b"br" if in_run => {
                // Page and column breaks carry no text
                if matches!(get_attribute(e, b"type").as_deref(), None | Some("textWrapping")) {
                    self.push_text("\n");
                }
            }
            b"noBreakHyphen" if in_run => self.push_text("-"),
            _ => {}
        }
    }

    fn end(&mut self) {
        let name = match self.stack.pop() {
            Some(name) => name,
            None => return,
        };

        if let Some(depth) = self.skip_from {
            if self.stack.len() == depth {
                self.skip_from = None;
            }
            return;
        }

        match name.as_slice() {
            b"t" => self.in_text = false,
            b"p" => {
                if let Some((target, text)) = self.paragraph.take() {
                    match target {
                        ParagraphTarget::Body => self.document.push_paragraph(text),
                        ParagraphTarget::Cell => {
                            if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
                                cell.paragraphs.push(text);
                            }
                        }
                    }
                }
                self.in_text = false;
            }
            b"tc" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_cell();
                }
            }
            b"tr" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_row();
                }
            }
            b"tbl" => {
                if self.parent() == Some(b"body".as_slice()) {
                    if let Some(mut builder) = self.table.take() {
                        builder.finish_row();
                        self.document.add_table(builder.table);
                    }
                }
            }
            b"sectPr" => {
                let depth = self.stack.len();
                if self.section.as_ref().is_some_and(|(d, _)| *d == depth) {
                    if let Some((_, section)) = self.section.take() {
                        self.document.push_section(section);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Parse `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<DocxMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.expand_empty_elements(true);

    let mut metadata = DocxMetadata::default();
    let mut field: Option<Vec<u8>> = None;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                if matches!(
                    name.as_slice(),
                    b"title" | b"creator" | b"created" | b"modified"
                ) {
                    field = Some(name);
                    value.clear();
                }
            }
            Event::Text(ref e) => {
                if field.is_some() {
                    value.push_str(&e.unescape()?);
                }
            }
            Event::End(_) => {
                if let Some(name) = field.take() {
                    let text = value.trim();
                    if !text.is_empty() {
                        match name.as_slice() {
                            b"title" => metadata.title = Some(text.to_string()),
                            b"creator" => metadata.author = Some(text.to_string()),
                            b"created" => metadata.created = parse_w3c_date(text),
                            b"modified" => metadata.modified = parse_w3c_date(text),
                            _ => {}
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

/// Parse a W3CDTF timestamp such as `2024-01-15T10:30:00Z`.
fn parse_w3c_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Get an attribute value by local name.
fn get_attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}
