//! Render configuration.
//!
//! A [`RenderConfiguration`] is fixed for the lifetime of a layout session.
//! It can be built in code with the `with_*` setters or loaded from YAML:
//!
//! ```rust
//! use textgrid::RenderConfiguration;
//!
//! let config = RenderConfiguration::from_yaml(r#"
//! showNulls: true
//! nullLabel: "<NULL>"
//! maxColumnWidth: 40
//! delimiterLeading: true
//! "#).unwrap();
//!
//! assert!(config.show_nulls);
//! assert_eq!(config.max_column_width, 40);
//! assert_eq!(config.tab_width, 4); // default
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Label used for null values unless configured otherwise.
pub const DEFAULT_NULL_LABEL: &str = "[NULL]";

/// Which flavour of value text the formatter should produce.
///
/// The engine never interprets this; it is handed to the
/// [`ValueFormatter`](crate::ValueFormatter) untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Human-oriented, locale-aware text.
    #[default]
    Ui,
    /// Text suitable for editing.
    Edit,
    /// Raw database representation.
    Native,
}

impl FromStr for DisplayFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ui" => Ok(DisplayFormat::Ui),
            "edit" => Ok(DisplayFormat::Edit),
            "native" => Ok(DisplayFormat::Native),
            _ => Err(LayoutError::UnknownDisplayFormat(s.to_string())),
        }
    }
}

/// Options that shape the rendered text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfiguration {
    /// Decimal-align and right-justify numeric columns.
    pub right_justify_numbers: bool,
    /// Right-justify date/time columns.
    pub right_justify_date_time: bool,
    /// Start every line with `|`.
    pub delimiter_leading: bool,
    /// End every line with `|`.
    pub delimiter_trailing: bool,
    /// Render null values as [`null_label`](Self::null_label).
    pub show_nulls: bool,
    /// Text used for nulls when `show_nulls` is set.
    pub null_label: String,
    /// Columns reserved for each tab character.
    pub tab_width: usize,
    /// Hard cap on the width of any column.
    pub max_column_width: usize,
    /// Passed through to the value formatter.
    pub display_format: DisplayFormat,
}

impl Default for RenderConfiguration {
    fn default() -> Self {
        Self {
            right_justify_numbers: true,
            right_justify_date_time: true,
            delimiter_leading: false,
            delimiter_trailing: false,
            show_nulls: false,
            null_label: DEFAULT_NULL_LABEL.to_string(),
            tab_width: 4,
            max_column_width: 255,
            display_format: DisplayFormat::Ui,
        }
    }
}

impl RenderConfiguration {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML. Missing keys take their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(LayoutError::InvalidTabWidth(self.tab_width));
        }
        if self.max_column_width == 0 {
            return Err(LayoutError::InvalidMaxColumnWidth(self.max_column_width));
        }
        Ok(())
    }

    pub fn with_right_justify_numbers(mut self, enable: bool) -> Self {
        self.right_justify_numbers = enable;
        self
    }

    pub fn with_right_justify_date_time(mut self, enable: bool) -> Self {
        self.right_justify_date_time = enable;
        self
    }

    /// Enable or disable both leading and trailing delimiters.
    pub fn with_delimiters(mut self, leading: bool, trailing: bool) -> Self {
        self.delimiter_leading = leading;
        self.delimiter_trailing = trailing;
        self
    }

    /// Show nulls using the given label.
    pub fn with_null_label(mut self, label: impl Into<String>) -> Self {
        self.show_nulls = true;
        self.null_label = label.into();
        self
    }

    pub fn with_show_nulls(mut self, enable: bool) -> Self {
        self.show_nulls = enable;
        self
    }

    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    pub fn with_display_format(mut self, format: DisplayFormat) -> Self {
        self.display_format = format;
        self
    }
}
