//! Table types.

use serde::{Deserialize, Serialize};

/// A table from the document body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve every row to the text of each grid column it covers.
    ///
    /// A cell spanning `n` grid columns appears `n` times. A cell that
    /// continues a vertical merge takes the text of the cell above it in
    /// the same grid column.
    pub fn resolved_rows(&self) -> Vec<Vec<String>> {
        let mut resolved: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut columns = Vec::with_capacity(row.grid_width());
            for cell in &row.cells {
                let text = match cell.v_merge {
                    VerticalMerge::Continue => resolved
                        .last()
                        .and_then(|above| above.get(columns.len()))
                        .cloned()
                        .unwrap_or_else(|| cell.text()),
                    _ => cell.text(),
                };
                for _ in 0..cell.grid_span.max(1) {
                    columns.push(text.clone());
                }
            }
            resolved.push(columns);
        }

        resolved
    }

    /// Get plain text representation of the table, one line per row.
    pub fn plain_text(&self) -> String {
        self.resolved_rows()
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if any cell spans more than one grid column or row.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.is_merged())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row, as written in the document
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values, one single-paragraph cell each.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::new).collect())
    }

    /// Number of grid columns covered by the row.
    pub fn grid_width(&self) -> usize {
        self.cells.iter().map(|c| c.grid_span.max(1) as usize).sum()
    }
}

/// Vertical merge state of a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMerge {
    /// Not part of a vertical merge
    #[default]
    None,
    /// First cell of a vertically merged region
    Restart,
    /// Continuation of the merged cell above
    Continue,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Text of each paragraph directly inside the cell
    pub paragraphs: Vec<String>,

    /// Number of grid columns this cell spans
    pub grid_span: u16,

    /// Vertical merge state
    pub v_merge: VerticalMerge,
}

impl TableCell {
    /// Create a new cell with a single paragraph of text.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_paragraphs(vec![text.into()])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_paragraphs(Vec::new())
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<String>) -> Self {
        Self {
            paragraphs,
            grid_span: 1,
            v_merge: VerticalMerge::None,
        }
    }

    /// Set the horizontal span and return self.
    pub fn span(mut self, span: u16) -> Self {
        self.grid_span = span;
        self
    }

    /// Set the vertical merge state and return self.
    pub fn merge(mut self, v_merge: VerticalMerge) -> Self {
        self.v_merge = v_merge;
        self
    }

    /// Cell text: paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Check if the cell has no visible text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.trim().is_empty())
    }

    /// Check if this cell is part of a horizontal or vertical merge.
    pub fn is_merged(&self) -> bool {
        self.grid_span > 1 || self.v_merge != VerticalMerge::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert!(table.resolved_rows().is_empty());
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["Name", "Age"]));
        table.add_row(TableRow::from_strings(["Alice", "30"]));

        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.resolved_rows(),
            vec![vec!["Name", "Age"], vec!["Alice", "30"]]
        );
        assert!(!table.has_merged_cells());
    }

    #[test]
    fn test_grid_span_repeats_cell() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::new("Wide").span(2),
            TableCell::new("C"),
        ]));

        assert!(table.has_merged_cells());
        assert_eq!(table.rows[0].grid_width(), 3);
        assert_eq!(table.resolved_rows(), vec![vec!["Wide", "Wide", "C"]]);
    }

    #[test]
    fn test_vertical_merge_takes_text_above() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::new("Group").merge(VerticalMerge::Restart),
            TableCell::new("a"),
        ]));
        table.add_row(TableRow::new(vec![
            TableCell::empty().merge(VerticalMerge::Continue),
            TableCell::new("b"),
        ]));
        table.add_row(TableRow::new(vec![
            TableCell::empty().merge(VerticalMerge::Continue),
            TableCell::new("c"),
        ]));

        let rows = table.resolved_rows();
        assert_eq!(rows[1], vec!["Group", "b"]);
        assert_eq!(rows[2], vec!["Group", "c"]);
    }

    #[test]
    fn test_continue_without_row_above_uses_own_text() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::new("orphan").merge(VerticalMerge::Continue)
        ]));
        assert_eq!(table.resolved_rows(), vec![vec!["orphan"]]);
    }

    #[test]
    fn test_cell_text() {
        let cell = TableCell::with_paragraphs(vec!["one".into(), "two".into()]);
        assert_eq!(cell.text(), "one\ntwo");
        assert!(!cell.is_empty());
        assert!(TableCell::new("   ").is_empty());
    }
}
