//! Record mode: the current row as a vertical name/value list.
//!
//! ```text
//! Name  |Value
//! ------|-----------
//! id    |7
//! title |Hello world
//! ```

use crate::cell::{header_text, render_cell};
use crate::column::{ColumnDescriptor, DataKind};
use crate::config::RenderConfiguration;
use crate::grid::{DELIMITER, DIVIDER};
use crate::metrics::ColumnMetrics;
use crate::resolve::DEFAULT_DECIMAL_SEPARATOR;
use crate::util::{clip, pad, Align};
use crate::value::ValueFormatter;

const NAME_HEADER: &str = "Name";
const VALUE_HEADER: &str = "Value";

/// Widths of the two record-mode columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordWidths {
    pub name: usize,
    pub value: usize,
}

/// Builds record-mode text.
#[derive(Clone, Copy, Debug)]
pub struct RecordRenderer<'a> {
    config: &'a RenderConfiguration,
}

impl<'a> RecordRenderer<'a> {
    pub fn new(config: &'a RenderConfiguration) -> Self {
        Self { config }
    }

    /// Render `row` (the current row) against `columns`.
    ///
    /// Without a current row only the header and divider are emitted.
    pub fn render<F: ValueFormatter>(
        &self,
        formatter: &F,
        columns: &[ColumnDescriptor],
        row: Option<&[F::Value]>,
    ) -> (String, RecordWidths) {
        let tab_width = self.config.tab_width;
        let values: Option<Vec<String>> = row.map(|cells| {
            columns
                .iter()
                .enumerate()
                .map(|(i, c)| render_cell(formatter, c, cells.get(i), self.config))
                .collect()
        });
        let names: Vec<String> = columns.iter().map(header_text).collect();
        let widths = self.widths(&names, values.as_deref());

        let mut lines = Vec::with_capacity(columns.len() + 2);
        lines.push(self.line(
            &pad(NAME_HEADER, widths.name, tab_width, Align::Left),
            &pad(VALUE_HEADER, widths.value, tab_width, Align::Left),
        ));
        lines.push(self.line(
            &std::iter::repeat_n(DIVIDER, widths.name).collect::<String>(),
            &std::iter::repeat_n(DIVIDER, widths.value).collect::<String>(),
        ));

        if let Some(values) = values {
            for (name, value) in names.iter().zip(&values) {
                let value = clip(value, widths.value, tab_width);
                lines.push(self.line(
                    &pad(name, widths.name, tab_width, Align::Left),
                    &pad(&value, widths.value, tab_width, Align::Left),
                ));
            }
        }

        (lines.join("\n"), widths)
    }

    /// Fold names and values into metrics for the two record columns.
    ///
    /// Only the value column is capped; names are always shown in full.
    fn widths(&self, names: &[String], values: Option<&[String]>) -> RecordWidths {
        let tab_width = self.config.tab_width;
        let column_metrics = |header: &str| {
            let column = ColumnDescriptor::new(header, DataKind::Other).required(true);
            ColumnMetrics::new(&column, &RenderConfiguration::default())
        };

        let mut name = column_metrics(NAME_HEADER);
        for n in names {
            name.fold(n, DEFAULT_DECIMAL_SEPARATOR, tab_width);
        }

        let mut value = column_metrics(VALUE_HEADER);
        for v in values.unwrap_or_default() {
            value.fold(v, DEFAULT_DECIMAL_SEPARATOR, tab_width);
        }
        value.cap(self.config.max_column_width, tab_width);

        RecordWidths {
            name: name.width(),
            value: value.width().max(VALUE_HEADER.len()),
        }
    }

    fn line(&self, name: &str, value: &str) -> String {
        let mut line = String::new();
        if self.config.delimiter_leading {
            line.push(DELIMITER);
        }
        line.push_str(name);
        line.push(DELIMITER);
        line.push_str(value);
        if self.config.delimiter_trailing {
            line.push(DELIMITER);
        }
        line
    }
}
