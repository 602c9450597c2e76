//! Grid mode: one aligned line per row under a header and a divider.
//!
//! ```text
//! name |   ID|amount
//! -----|-----|--------
//! alpha|    1|  12.5
//! beta |   22|   3.14159
//! ```
//!
//! Columns are separated by `|`; leading and trailing `|` are optional. The
//! divider repeats `-` for the full width of every column. Output never ends
//! with a line terminator.

use crate::cell::render_cell;
use crate::column::ColumnDescriptor;
use crate::config::RenderConfiguration;
use crate::metrics::ColumnMetrics;
use crate::resolve::DEFAULT_DECIMAL_SEPARATOR;
use crate::util::{clip, display_width, pad, push_spaces, split_decimal, Align};
use crate::value::ValueFormatter;

/// Column separator and optional border character.
pub const DELIMITER: char = '|';

/// Character repeated in the divider line.
pub const DIVIDER: char = '-';

/// What part of the grid to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEmit {
    /// Header, divider and every row: replaces any previous text.
    Full,
    /// Only the given rows, to be appended to previously emitted text.
    ///
    /// The chunk starts with a line break that terminates the previous last
    /// line. With `header` set, a fresh header and divider precede the rows.
    Append { header: bool },
}

/// Builds grid text from resolved column metrics.
#[derive(Clone, Copy, Debug)]
pub struct GridRenderer<'a> {
    config: &'a RenderConfiguration,
    separator: char,
}

impl<'a> GridRenderer<'a> {
    pub fn new(config: &'a RenderConfiguration, separator: Option<char>) -> Self {
        Self {
            config,
            separator: separator.unwrap_or(DEFAULT_DECIMAL_SEPARATOR),
        }
    }

    /// Render `rows` as a full grid or as an append chunk.
    pub fn render<F, R>(
        &self,
        formatter: &F,
        columns: &[ColumnDescriptor],
        metrics: &[ColumnMetrics],
        rows: &[R],
        emit: GridEmit,
    ) -> String
    where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        let mut lines = Vec::with_capacity(rows.len() + 2);
        let header = match emit {
            GridEmit::Full => true,
            GridEmit::Append { header } => header,
        };
        if header {
            lines.push(self.header_line(metrics));
            lines.push(self.divider_line(metrics));
        }
        for row in rows {
            lines.push(self.row_line(formatter, columns, metrics, row.as_ref()));
        }

        match emit {
            GridEmit::Full => lines.join("\n"),
            GridEmit::Append { .. } if lines.is_empty() => String::new(),
            GridEmit::Append { .. } => format!("\n{}", lines.join("\n")),
        }
    }

    /// Header line: each header padded to its column width.
    pub fn header_line(&self, metrics: &[ColumnMetrics]) -> String {
        self.join(metrics.iter().map(|m| {
            let align = if m.right_justified {
                Align::Right
            } else {
                Align::Left
            };
            pad(&m.header, m.width(), self.config.tab_width, align)
        }))
    }

    /// Divider line under the header.
    pub fn divider_line(&self, metrics: &[ColumnMetrics]) -> String {
        self.join(
            metrics
                .iter()
                .map(|m| std::iter::repeat_n(DIVIDER, m.width()).collect()),
        )
    }

    /// One data row.
    pub fn row_line<F: ValueFormatter>(
        &self,
        formatter: &F,
        columns: &[ColumnDescriptor],
        metrics: &[ColumnMetrics],
        cells: &[F::Value],
    ) -> String {
        self.join(
            columns
                .iter()
                .zip(metrics)
                .enumerate()
                .map(|(i, (column, metric))| {
                    let text = render_cell(formatter, column, cells.get(i), self.config);
                    self.cell(metric, &text)
                }),
        )
    }

    /// Fit one cell's text into its column.
    pub fn cell(&self, metric: &ColumnMetrics, text: &str) -> String {
        let tab_width = self.config.tab_width;
        let width = metric.width();
        let text = clip(text, width, tab_width);

        if !metric.decimal_aligned {
            let align = if metric.right_justified {
                Align::Right
            } else {
                Align::Left
            };
            return pad(&text, width, tab_width, align);
        }

        let text_width = display_width(&text, tab_width);
        let (int_width, _) = split_decimal(&text, self.separator, tab_width);
        let lead = (metric.int_width.saturating_sub(int_width) + metric.left_pad())
            .min(width - text_width);

        let mut out = String::with_capacity(width + text.len());
        push_spaces(&mut out, lead);
        out.push_str(&text);
        push_spaces(&mut out, width - lead - text_width);
        out
    }

    fn join(&self, cells: impl Iterator<Item = String>) -> String {
        let mut line = String::new();
        if self.config.delimiter_leading {
            line.push(DELIMITER);
        }
        for (i, cell) in cells.enumerate() {
            if i > 0 {
                line.push(DELIMITER);
            }
            line.push_str(&cell);
        }
        if self.config.delimiter_trailing {
            line.push(DELIMITER);
        }
        line
    }
}
