//! The layout engine facade.
//!
//! [`LayoutEngine`] owns the state of one layout session: the column list,
//! the configuration, the accumulated [`ColumnMetrics`], the number of rows
//! already rendered and the detected decimal separator. Hosts drive it with
//! three calls:
//!
//! - [`begin_session`](LayoutEngine::begin_session) whenever the column set
//!   changes (new query, different visible columns).
//! - [`render`](LayoutEngine::render) every time rows change. With
//!   `append = true` only rows past the previously rendered count are
//!   scanned and emitted.
//! - [`reset`](LayoutEngine::reset) to forget everything.
//!
//! ```rust
//! use textgrid::{
//!     ColumnDescriptor, DataKind, LayoutEngine, OutputKind, PlainFormatter,
//!     RenderConfiguration, RenderMode, Value,
//! };
//!
//! let mut engine = LayoutEngine::new();
//! engine
//!     .begin_session(
//!         vec![ColumnDescriptor::new("ID", DataKind::Numeric)],
//!         RenderConfiguration::default(),
//!     )
//!     .unwrap();
//!
//! let fmt = PlainFormatter::new();
//! let mut rows = vec![vec![Value::Integer(1)], vec![Value::Integer(22)]];
//! let out = engine.render(&fmt, &rows, RenderMode::Grid, false);
//! assert_eq!(out.text, "ID\n--\n 1\n22");
//!
//! rows.push(vec![Value::Integer(5)]);
//! let out = engine.render(&fmt, &rows, RenderMode::Grid, true);
//! assert_eq!(out.kind, OutputKind::Append);
//! assert_eq!(out.text, "\n 5");
//! ```

use serde::Serialize;

use crate::column::ColumnDescriptor;
use crate::config::RenderConfiguration;
use crate::error::Result;
use crate::grid::{GridEmit, GridRenderer};
use crate::metrics::ColumnMetrics;
use crate::position::{column_spans, CellPosition, ColumnSpan, LineMap};
use crate::record::RecordRenderer;
use crate::resolve::{detect_decimal_separator, initial_metrics, WidthResolver};
use crate::value::ValueFormatter;

/// Which layout to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// All rows as an aligned table.
    Grid,
    /// The row at index `row` as a name/value list.
    Record { row: Option<usize> },
}

/// How the host should apply the returned text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Replace all previously displayed text.
    Replace,
    /// Append to the previously displayed text.
    Append,
}

/// Result of one render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    pub text: String,
    pub kind: OutputKind,
    /// A header and divider are part of `text`.
    pub header_emitted: bool,
    /// Data lines in `text`.
    pub rows_emitted: usize,
    /// Some column got wider or moved its decimal mark during this call.
    pub widths_changed: bool,
}

/// State accumulated between one column change and the next.
#[derive(Clone, Debug)]
struct Session {
    columns: Vec<ColumnDescriptor>,
    config: RenderConfiguration,
    metrics: Vec<ColumnMetrics>,
    rendered_rows: usize,
    separator: Option<char>,
    separator_detected: bool,
    grid_on_display: bool,
    lines: LineMap,
}

impl Session {
    fn new(columns: Vec<ColumnDescriptor>, config: RenderConfiguration) -> Self {
        let metrics = initial_metrics(&columns, &config);
        Self {
            columns,
            config,
            metrics,
            rendered_rows: 0,
            separator: None,
            separator_detected: false,
            grid_on_display: false,
            lines: LineMap::new(),
        }
    }

    fn layout(&self) -> Vec<(usize, usize, usize)> {
        self.metrics.iter().map(ColumnMetrics::layout).collect()
    }

    fn detect_separator<F: ValueFormatter>(&mut self, formatter: &F) {
        if !self.separator_detected {
            self.separator =
                detect_decimal_separator(formatter, &self.columns, self.config.display_format);
            self.separator_detected = true;
        }
    }

    fn render_grid<F, R>(&mut self, formatter: &F, rows: &[R], append: bool) -> RenderOutput
    where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        self.detect_separator(formatter);

        let append = append && self.grid_on_display;
        let start = if append {
            self.rendered_rows.min(rows.len())
        } else {
            0
        };
        let batch = &rows[start..];

        let before = self.layout();
        WidthResolver::new(&self.config, self.separator).resolve(
            formatter,
            &self.columns,
            &mut self.metrics,
            batch,
        );
        let widths_changed = before != self.layout();

        let emit = if append {
            GridEmit::Append {
                header: widths_changed,
            }
        } else {
            GridEmit::Full
        };
        let text = GridRenderer::new(&self.config, self.separator).render(
            formatter,
            &self.columns,
            &self.metrics,
            batch,
            emit,
        );

        let header_emitted = !append || widths_changed;
        if !append {
            self.lines.clear();
        }
        if header_emitted {
            self.lines.push_header();
        }
        self.lines.push_rows(start..rows.len());
        self.rendered_rows = rows.len();
        self.grid_on_display = true;

        RenderOutput {
            text,
            kind: if append {
                OutputKind::Append
            } else {
                OutputKind::Replace
            },
            header_emitted,
            rows_emitted: batch.len(),
            widths_changed,
        }
    }

    fn render_record<F, R>(&mut self, formatter: &F, rows: &[R], row: Option<usize>) -> RenderOutput
    where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        let row = row.filter(|&i| i < rows.len());
        let (text, _) = RecordRenderer::new(&self.config).render(
            formatter,
            &self.columns,
            row.map(|i| rows[i].as_ref()),
        );

        self.lines.set_record(row, self.columns.len());
        self.grid_on_display = false;

        RenderOutput {
            text,
            kind: OutputKind::Replace,
            header_emitted: true,
            rows_emitted: if row.is_some() { self.columns.len() } else { 0 },
            widths_changed: false,
        }
    }
}

/// Plain-text layout engine for result sets.
///
/// Calls on one engine must not overlap; `render` takes `&mut self`, so the
/// compiler enforces this for safe code.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    session: Option<Session>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session for `columns`, discarding all accumulated state.
    ///
    /// Fails before anything is rendered if the configuration is unusable.
    pub fn begin_session(
        &mut self,
        columns: Vec<ColumnDescriptor>,
        config: RenderConfiguration,
    ) -> Result<()> {
        config.validate()?;
        tracing::debug!(
            columns = columns.len(),
            max_column_width = config.max_column_width,
            "layout session started"
        );
        self.session = Some(Session::new(columns, config));
        Ok(())
    }

    /// Forget the session, as if no columns were ever supplied.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("layout session reset");
        }
    }

    /// Lay out `rows` in the requested mode.
    ///
    /// `rows` is the full list of rows the host currently holds. In grid mode
    /// with `append` set, only rows after the previously rendered count are
    /// scanned and returned as an [`OutputKind::Append`] chunk; the chunk
    /// carries a fresh header when any column got wider or moved its decimal
    /// mark. Without a previous grid render, `append` is ignored. Record mode
    /// always replaces.
    ///
    /// An append never reads rows before [`rendered_rows`](Self::rendered_rows),
    /// so a streaming host may drop their contents (leaving empty rows in
    /// place) to keep memory bounded by the batch size.
    ///
    /// Rendering without a session lays out zero columns with the default
    /// configuration, which yields an empty header.
    pub fn render<F, R>(
        &mut self,
        formatter: &F,
        rows: &[R],
        mode: RenderMode,
        append: bool,
    ) -> RenderOutput
    where
        F: ValueFormatter,
        R: AsRef<[F::Value]>,
    {
        let session = self
            .session
            .get_or_insert_with(|| Session::new(Vec::new(), RenderConfiguration::default()));

        let output = match mode {
            RenderMode::Grid => session.render_grid(formatter, rows, append),
            RenderMode::Record { row } => session.render_record(formatter, rows, row),
        };

        tracing::debug!(
            ?mode,
            kind = ?output.kind,
            rows_emitted = output.rows_emitted,
            header_emitted = output.header_emitted,
            widths_changed = output.widths_changed,
            "layout rendered"
        );
        if output.widths_changed && output.kind == OutputKind::Append {
            tracing::info!(
                "column layout changed during append; earlier rows keep their old alignment"
            );
        }
        output
    }

    /// Columns of the current session.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.session.as_ref().map_or(&[], |s| &s.columns)
    }

    /// Current column metrics.
    pub fn metrics(&self) -> &[ColumnMetrics] {
        self.session.as_ref().map_or(&[], |s| &s.metrics)
    }

    /// Configuration of the current session.
    pub fn config(&self) -> Option<&RenderConfiguration> {
        self.session.as_ref().map(|s| &s.config)
    }

    /// Rows rendered so far in grid mode.
    pub fn rendered_rows(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.rendered_rows)
    }

    /// Decimal separator detected for the session, once detected.
    pub fn decimal_separator(&self) -> Option<char> {
        self.session.as_ref().and_then(|s| s.separator)
    }

    /// Horizontal span of each column for the current widths.
    pub fn column_spans(&self) -> Vec<ColumnSpan> {
        self.session
            .as_ref()
            .map(|s| column_spans(&s.metrics, &s.config))
            .unwrap_or_default()
    }

    /// Description of every line emitted so far.
    pub fn line_map(&self) -> Option<&LineMap> {
        self.session.as_ref().map(|s| &s.lines)
    }

    /// Map a position in the displayed text to a cell.
    ///
    /// `line` counts lines from the start of the displayed text and `offset`
    /// is the display column within that line.
    pub fn hit_test(&self, line: usize, offset: usize) -> Option<CellPosition> {
        let session = self.session.as_ref()?;
        let spans = column_spans(&session.metrics, &session.config);
        session.lines.hit_test(line, offset, &spans)
    }
}
