//! Paragraph and section types.

use serde::{Deserialize, Serialize};

/// A body paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Position among all body paragraphs (1-indexed, blank ones included)
    pub index: usize,

    /// Paragraph text, untrimmed
    pub text: String,
}

impl Paragraph {
    /// Create a new paragraph.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Check if the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A document section (a run of pages sharing one page setup).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section number (1-indexed)
    pub index: usize,

    /// Page width in twentieths of a point
    pub page_width: Option<u32>,

    /// Page height in twentieths of a point
    pub page_height: Option<u32>,

    /// Whether the page orientation is landscape
    pub landscape: bool,
}

impl Section {
    /// Create a section with no page setup information.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Page size in points, if both dimensions are known.
    pub fn page_size_points(&self) -> Option<(f32, f32)> {
        match (self.page_width, self.page_height) {
            (Some(w), Some(h)) => Some((w as f32 / 20.0, h as f32 / 20.0)),
            _ => None,
        }
    }
}
