//! Error types for the layout engine.

use thiserror::Error;

/// Errors reported synchronously by the layout engine.
///
/// Only session setup can fail. Problems with individual cells never surface
/// here; they are absorbed into the cell text (see [`CellError`]).
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Tab width must be at least one column.
    #[error("invalid tab width {0}: must be greater than zero")]
    InvalidTabWidth(usize),

    /// Maximum column width must be at least one column.
    #[error("invalid maximum column width {0}: must be greater than zero")]
    InvalidMaxColumnWidth(usize),

    /// Unrecognised data kind name.
    #[error("unknown data kind '{0}' (expected numeric, datetime or other)")]
    UnknownDataKind(String),

    /// Unrecognised display format name.
    #[error("unknown display format '{0}' (expected ui, edit or native)")]
    UnknownDisplayFormat(String),

    /// Configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Failure reported by a [`ValueFormatter`](crate::ValueFormatter) for a single cell.
///
/// The engine renders the title in place of the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}")]
pub struct CellError {
    /// Short text shown in the cell.
    pub title: String,
}

impl CellError {
    /// Create a cell error with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
