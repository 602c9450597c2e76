//! Width resolution for a batch of rows.
//!
//! Resolution runs in two passes over the batch:
//!
//! 1. **Scan**: every cell is rendered to text and folded into its column's
//!    [`ColumnMetrics`] (running maxima).
//! 2. **Cap**: every column is clamped to the configured maximum width.
//!
//! Because folding is max-based, resolving an appended batch against the
//! metrics of earlier batches gives the same result as resolving all rows at
//! once, without touching the earlier rows again.

use crate::cell::render_cell;
use crate::column::{ColumnDescriptor, DataKind};
use crate::config::{DisplayFormat, RenderConfiguration};
use crate::metrics::ColumnMetrics;
use crate::value::ValueFormatter;

/// Separator assumed when the formatter cannot be queried.
pub const DEFAULT_DECIMAL_SEPARATOR: char = '.';

/// Find out which decimal separator the formatter emits.
///
/// Formats the sample value 1.1 for the first numeric column and returns `.`
/// if the text contains one, `,` otherwise. Returns `None` when there is no
/// numeric column, since nothing needs decimal alignment.
pub fn detect_decimal_separator<F: ValueFormatter>(
    formatter: &F,
    columns: &[ColumnDescriptor],
    format: DisplayFormat,
) -> Option<char> {
    let column = columns.iter().find(|c| c.kind == DataKind::Numeric)?;
    let separator = match formatter.format_decimal_sample(column, format) {
        Ok(sample) if sample.contains('.') => '.',
        Ok(_) => ',',
        Err(_) => DEFAULT_DECIMAL_SEPARATOR,
    };
    Some(separator)
}

/// Folds row batches into column metrics.
#[derive(Clone, Copy, Debug)]
pub struct WidthResolver<'a> {
    config: &'a RenderConfiguration,
    separator: char,
}

impl<'a> WidthResolver<'a> {
    /// Create a resolver; `separator` is the session's detected separator.
    pub fn new(config: &'a RenderConfiguration, separator: Option<char>) -> Self {
        Self {
            config,
            separator: separator.unwrap_or(DEFAULT_DECIMAL_SEPARATOR),
        }
    }

    /// Scan pass: fold every cell of `rows` into `metrics`.
    ///
    /// `metrics` must be parallel to `columns`. Cells missing from short rows
    /// are folded as nulls.
    pub fn fold_rows<F, R>(
        &self,
        formatter: &F,
        columns: &[ColumnDescriptor],
        metrics: &mut [ColumnMetrics],
        rows: &[R],
    ) where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        for row in rows {
            let cells = row.as_ref();
            for (i, (column, metric)) in columns.iter().zip(metrics.iter_mut()).enumerate() {
                let text = render_cell(formatter, column, cells.get(i), self.config);
                metric.fold(&text, self.separator, self.config.tab_width);
            }
        }
    }

    /// Cap pass: clamp every column to the maximum column width.
    pub fn cap(&self, metrics: &mut [ColumnMetrics]) {
        for metric in metrics {
            metric.cap(self.config.max_column_width, self.config.tab_width);
        }
    }

    /// Run both passes over `rows`.
    pub fn resolve<F, R>(
        &self,
        formatter: &F,
        columns: &[ColumnDescriptor],
        metrics: &mut [ColumnMetrics],
        rows: &[R],
    ) where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        self.fold_rows(formatter, columns, metrics, rows);
        self.cap(metrics);
    }
}

/// Fresh metrics for every column.
pub fn initial_metrics(
    columns: &[ColumnDescriptor],
    config: &RenderConfiguration,
) -> Vec<ColumnMetrics> {
    columns
        .iter()
        .map(|c| ColumnMetrics::new(c, config))
        .collect()
}
