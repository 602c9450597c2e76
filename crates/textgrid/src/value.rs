//! Value formatting collaborator.
//!
//! The engine does not know how to turn raw cell values into text. Hosts
//! implement [`ValueFormatter`] for their own value type; [`Value`] and
//! [`PlainFormatter`] are a ready-made pair for simple hosts and tests.

use crate::column::ColumnDescriptor;
use crate::config::DisplayFormat;
use crate::error::CellError;

/// Turns raw cell values into display strings.
pub trait ValueFormatter {
    /// Raw cell value type.
    type Value;

    /// Format a value for display.
    ///
    /// Returning an error does not abort rendering; the error title is shown
    /// in the cell instead.
    fn format_value(
        &self,
        column: &ColumnDescriptor,
        value: &Self::Value,
        format: DisplayFormat,
    ) -> Result<String, CellError>;

    /// Whether the value is a database null.
    fn is_null(&self, value: &Self::Value) -> bool;

    /// Title of an error sentinel value, or `None` for ordinary values.
    fn error_title(&self, _value: &Self::Value) -> Option<String> {
        None
    }

    /// Format the number 1.1 the way `column` would show it.
    ///
    /// Used once per session to find out which decimal separator the
    /// formatter emits.
    fn format_decimal_sample(
        &self,
        column: &ColumnDescriptor,
        format: DisplayFormat,
    ) -> Result<String, CellError>;
}

/// A simple dynamically typed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Error sentinel carrying its title.
    Error(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Formatter for [`Value`] with a configurable decimal mark.
///
/// The decimal mark applies to [`DisplayFormat::Ui`] and
/// [`DisplayFormat::Edit`]; [`DisplayFormat::Native`] always uses `.`.
///
/// ```rust
/// use textgrid::{ColumnDescriptor, DataKind, DisplayFormat, PlainFormatter, Value, ValueFormatter};
///
/// let col = ColumnDescriptor::new("price", DataKind::Numeric);
/// let fmt = PlainFormatter::with_decimal_mark(',');
///
/// assert_eq!(fmt.format_value(&col, &Value::Float(2.5), DisplayFormat::Ui).unwrap(), "2,5");
/// assert_eq!(fmt.format_value(&col, &Value::Float(2.5), DisplayFormat::Native).unwrap(), "2.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlainFormatter {
    decimal_mark: char,
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self { decimal_mark: '.' }
    }
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `mark` as the decimal mark for UI and edit formats.
    pub fn with_decimal_mark(mark: char) -> Self {
        Self { decimal_mark: mark }
    }

    fn format_float(&self, v: f64, format: DisplayFormat) -> String {
        let text = v.to_string();
        match format {
            DisplayFormat::Native => text,
            DisplayFormat::Ui | DisplayFormat::Edit if self.decimal_mark != '.' => {
                text.replace('.', &self.decimal_mark.to_string())
            }
            _ => text,
        }
    }
}

impl ValueFormatter for PlainFormatter {
    type Value = Value;

    fn format_value(
        &self,
        _column: &ColumnDescriptor,
        value: &Value,
        format: DisplayFormat,
    ) -> Result<String, CellError> {
        Ok(match value {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => self.format_float(*v, format),
            Value::Text(v) => v.clone(),
            Value::Error(title) => return Err(CellError::new(title.clone())),
        })
    }

    fn is_null(&self, value: &Value) -> bool {
        matches!(value, Value::Null)
    }

    fn error_title(&self, value: &Value) -> Option<String> {
        match value {
            Value::Error(title) => Some(title.clone()),
            _ => None,
        }
    }

    fn format_decimal_sample(
        &self,
        _column: &ColumnDescriptor,
        format: DisplayFormat,
    ) -> Result<String, CellError> {
        Ok(self.format_float(1.1, format))
    }
}
