//! Table payloads: the `{rows, cols, data}` JSON carried in a table
//! element's `content`, and the mapping from a canvas point to a cell.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::error::TableError;

/// Text placed in every cell of a freshly created table.
pub const DEFAULT_CELL_TEXT: &str = "Cell";

/// Placeholder the render layer shows instead of a malformed table.
pub const INVALID_TABLE_PLACEHOLDER: &str = "Invalid table data";

/// Row-major grid of cell strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContent {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<String>>,
}

impl TableContent {
    /// A `rows` × `cols` grid filled with `text`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, text: &str) -> Self {
        Self { rows, cols, data: vec![vec![text.to_string(); cols]; rows] }
    }

    /// Parse and validate a serialized payload.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for invalid JSON, `RowCount` / `ColumnCount` when
    /// `data` does not match the declared dimensions.
    pub fn parse(content: &str) -> Result<Self, TableError> {
        let table: TableContent = serde_json::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that `data` is exactly `rows` × `cols`.
    ///
    /// # Errors
    ///
    /// Returns the first dimension mismatch found.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.data.len() != self.rows {
            return Err(TableError::RowCount { expected: self.rows, actual: self.data.len() });
        }
        for (row, cells) in self.data.iter().enumerate() {
            if cells.len() != self.cols {
                return Err(TableError::ColumnCount { row, expected: self.cols, actual: cells.len() });
            }
        }
        Ok(())
    }

    /// Serialize back into element content.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_content(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.data.get(row)?.get(col).map(String::as_str)
    }

    /// Returns a copy with one cell replaced. Every other cell is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CellOutOfRange` when `(row, col)` is outside the grid.
    pub fn with_cell(&self, row: usize, col: usize, value: impl Into<String>) -> Result<Self, TableError> {
        let mut next = self.clone();
        let cell = next
            .data
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(TableError::CellOutOfRange { row, col })?;
        *cell = value.into();
        Ok(next)
    }
}

impl Default for TableContent {
    fn default() -> Self {
        Self::filled(3, 3, DEFAULT_CELL_TEXT)
    }
}

/// Replace one cell of a serialized payload, returning the new payload.
///
/// # Errors
///
/// Fails if `content` is malformed or the cell is out of range.
pub fn set_cell(content: &str, row: usize, col: usize, value: &str) -> Result<String, TableError> {
    TableContent::parse(content)?.with_cell(row, col, value)?.to_content()
}

/// The cell under `point` when the grid is laid out uniformly over `bounds`.
#[must_use]
pub fn cell_at(bounds: Rect, rows: usize, cols: usize, point: Point) -> Option<(usize, usize)> {
    if rows == 0 || cols == 0 || !bounds.contains(point) {
        return None;
    }
    let row = grid_index(point.y - bounds.y, bounds.height, rows);
    let col = grid_index(point.x - bounds.x, bounds.width, cols);
    Some((row, col))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn grid_index(offset: f64, extent: f64, count: usize) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    let index = (offset / extent * count as f64).floor() as usize;
    index.min(count - 1)
}
