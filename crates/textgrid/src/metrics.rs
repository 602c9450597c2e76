//! Per-column width bookkeeping.
//!
//! A [`ColumnMetrics`] accumulates the widths seen in a column across a
//! session. Folding is max-based, so widths only ever grow until the session
//! is restarted.

use serde::Serialize;

use crate::cell::header_text;
use crate::column::{ColumnDescriptor, DataKind};
use crate::config::RenderConfiguration;
use crate::util::{clip, display_width, split_decimal};

/// Width and alignment state of one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnMetrics {
    /// Header text, truncated to the maximum column width once capped.
    pub header: String,
    /// Values are aligned on the decimal separator.
    pub decimal_aligned: bool,
    /// Values and header are padded on the left.
    pub right_justified: bool,
    /// Widest non-numeric text seen (header, null label, plain values).
    pub string_width: usize,
    /// Widest integer part seen in a decimal-aligned column.
    pub int_width: usize,
    /// Widest fractional part seen in a decimal-aligned column.
    pub frac_width: usize,
}

impl ColumnMetrics {
    /// Fresh metrics for a column at the start of a session, already capped.
    pub fn new(column: &ColumnDescriptor, config: &RenderConfiguration) -> Self {
        let decimal_aligned = column.kind == DataKind::Numeric && config.right_justify_numbers;
        let right_justified = decimal_aligned
            || (column.kind == DataKind::DateTime && config.right_justify_date_time);
        let header = header_text(column);
        let mut string_width = display_width(&header, config.tab_width);
        if config.show_nulls && !column.required {
            string_width = string_width.max(display_width(&config.null_label, config.tab_width));
        }

        let mut metrics = Self {
            header,
            decimal_aligned,
            right_justified,
            string_width,
            int_width: 0,
            frac_width: 0,
        };
        metrics.cap(config.max_column_width, config.tab_width);
        metrics
    }

    /// Width of the numeric part: integer digits, separator and fraction.
    pub fn numeric_width(&self) -> usize {
        self.int_width
            + if self.frac_width > 0 {
                self.frac_width + 1
            } else {
                0
            }
    }

    /// Rendered width of the column.
    pub fn width(&self) -> usize {
        if self.decimal_aligned {
            self.numeric_width().max(self.string_width)
        } else {
            self.string_width
        }
    }

    /// Extra left padding for numbers when the header is wider than them.
    pub fn left_pad(&self) -> usize {
        self.string_width.saturating_sub(self.numeric_width())
    }

    /// Everything that decides where text lands in the column: two columns
    /// of equal width can still place the decimal mark differently.
    pub fn layout(&self) -> (usize, usize, usize) {
        (self.string_width, self.int_width, self.frac_width)
    }

    /// Fold one cell's text into the running maxima.
    pub fn fold(&mut self, text: &str, separator: char, tab_width: usize) {
        if self.decimal_aligned {
            let (int, frac) = split_decimal(text, separator, tab_width);
            self.int_width = self.int_width.max(int);
            self.frac_width = self.frac_width.max(frac);
        } else {
            self.string_width = self.string_width.max(display_width(text, tab_width));
        }
    }

    /// Clamp the column to `max_width`.
    ///
    /// Overflow is taken from the fractional part first, then from the
    /// integer part. The resulting width is exactly
    /// `min(width before capping, max_width)`: when dropping the fraction also
    /// removes the separator and undershoots, `string_width` is raised to the
    /// target so the column never shrinks.
    pub fn cap(&mut self, max_width: usize, tab_width: usize) {
        let target = self.width().min(max_width);

        self.header = clip(&self.header, max_width, tab_width);
        self.string_width = self.string_width.min(max_width);

        if self.decimal_aligned {
            let overflow = self.width().saturating_sub(max_width);
            self.frac_width -= overflow.min(self.frac_width);
            let overflow = self.width().saturating_sub(max_width);
            self.int_width = self.int_width.saturating_sub(overflow);
            if self.width() < target {
                self.string_width = target;
            }
        }
    }
}
