//! Parsing options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for parsing documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to extract PDF pages in parallel
    pub parallel: bool,

    /// Page selection (which PDF pages to extract)
    pub pages: PageSelection,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (record per-page failures and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            pages: PageSelection::All,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Keep going past pages whose text cannot be extracted
    Lenient,
}

/// Page selection for PDF extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed, sorted, deduplicated)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    ///
    /// A list may name at most [`MAX_LISTED_PAGES`] pages in total; a single
    /// range is kept as a range and has no such limit.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = parse_bounds(start, end, s)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(start, end, part)?;
                let span = u64::from(end - start) + 1;
                if pages.len() as u64 + span > MAX_LISTED_PAGES as u64 {
                    return Err(Error::InvalidPageRange(part.to_string()));
                }
                pages.extend(start..=end);
            } else {
                let page = parse_page(part, part)?;
                if pages.len() >= MAX_LISTED_PAGES {
                    return Err(Error::InvalidPageRange(part.to_string()));
                }
                pages.push(page);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

/// Upper bound on the pages a comma-separated selection expands to.
pub const MAX_LISTED_PAGES: usize = 100_000;

fn parse_page(value: &str, context: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(context.to_string())),
        Ok(page) => Ok(page),
    }
}

fn parse_bounds(start: &str, end: &str, context: &str) -> Result<(u32, u32)> {
    let start = parse_page(start, context)?;
    let end = parse_page(end, context)?;
    if start > end {
        return Err(Error::InvalidPageRange(context.to_string()));
    }
    Ok((start, end))
}
