//! Word-processing document types.

use super::{Paragraph, Section, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed DOCX document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocxDocument {
    /// Core properties (title, author, dates)
    pub metadata: DocxMetadata,

    /// All body paragraphs, blank ones included
    pub paragraphs: Vec<Paragraph>,

    /// Top-level body tables
    pub tables: Vec<Table>,

    /// Document sections
    pub sections: Vec<Section>,
}

impl DocxDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph, numbering it after the existing ones.
    pub fn push_paragraph(&mut self, text: impl Into<String>) {
        let index = self.paragraphs.len() + 1;
        self.paragraphs.push(Paragraph::new(index, text));
    }

    /// Append a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Append a section, numbering it after the existing ones.
    pub fn push_section(&mut self, mut section: Section) {
        section.index = self.sections.len() + 1;
        self.sections.push(section);
    }

    /// Total number of paragraphs, blank ones included.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Total number of top-level tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Paragraphs with visible text, keeping their original indices.
    pub fn visible_paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(|p| !p.is_blank())
    }

    /// Check if the document has no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }

    /// Get plain text of the body paragraphs followed by the tables.
    pub fn plain_text(&self) -> String {
        self.visible_paragraphs()
            .map(|p| p.text.clone())
            .chain(self.tables.iter().map(|t| t.plain_text()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Core document properties from `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocxMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author (`dc:creator`)
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}
