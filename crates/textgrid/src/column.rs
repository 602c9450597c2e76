//! Column descriptors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Broad data kind of a column, as far as layout is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    /// Numbers; decimal-aligned when numbers are right-justified.
    Numeric,
    /// Dates, times and timestamps.
    #[serde(alias = "date", alias = "time", alias = "timestamp")]
    DateTime,
    /// Everything else.
    #[default]
    Other,
}

impl FromStr for DataKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" | "number" => Ok(DataKind::Numeric),
            "datetime" | "date" | "time" | "timestamp" => Ok(DataKind::DateTime),
            "other" | "text" => Ok(DataKind::Other),
            _ => Err(LayoutError::UnknownDataKind(s.to_string())),
        }
    }
}

/// One visible column of a result set.
///
/// # Example
///
/// ```rust
/// use textgrid::{ColumnDescriptor, DataKind};
///
/// let col = ColumnDescriptor::new("cust_id", DataKind::Numeric)
///     .label("Customer")
///     .required(true);
///
/// assert_eq!(col.display_name(), "Customer");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Attribute name.
    pub name: String,
    /// Optional label shown instead of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Data kind.
    #[serde(default)]
    pub kind: DataKind,
    /// Whether the column can never hold null.
    #[serde(default)]
    pub required: bool,
}

impl ColumnDescriptor {
    /// Create a nullable column with the given name and kind.
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: false,
        }
    }

    /// Set the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the column as required (not nullable).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The label when present and non-empty, otherwise the name.
    pub fn display_name(&self) -> &str {
        match &self.label {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }
}
