//! Error types for the editor core.
//!
//! Nothing in the core is fatal. These errors cover the few operations that
//! can be asked to do something impossible (patch an unknown element, edit a
//! cell outside the grid) and the table payload failures that the render
//! layer turns into an inline placeholder.

use crate::doc::ElementId;

/// Failure to interpret or edit a serialized table payload.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("table declares {expected} rows but has {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("table row {row} declares {expected} columns but has {actual}")]
    ColumnCount { row: usize, expected: usize, actual: usize },
    #[error("cell ({row}, {col}) is outside the table")]
    CellOutOfRange { row: usize, col: usize },
}

/// Failure of an element-level operation on the canvas host.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("element is not a table: {0}")]
    NotATable(ElementId),
    #[error("element is not a text element: {0}")]
    NotText(ElementId),
    #[error("table edit failed: {0}")]
    Table(#[from] TableError),
}

/// Invalid editor configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
    #[error("zoom range is empty: min {min} > max {max}")]
    ZoomRange { min: u16, max: u16 },
    #[error("zoom step must be positive")]
    ZoomStep,
    #[error("minimum element size must be positive, got {0}")]
    MinSize(f64),
}
