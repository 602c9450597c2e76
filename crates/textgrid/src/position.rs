//! Positional metadata for mapping text positions back to cells.
//!
//! Hosts display the rendered text in a widget and need to know which cell a
//! caret or click lands on. Column spans are a pure function of the column
//! widths; the [`LineMap`] records what each emitted line holds.

use serde::Serialize;

use crate::config::RenderConfiguration;
use crate::metrics::ColumnMetrics;

/// Horizontal extent of a grid column, in display columns.
///
/// `start` is inclusive and `end` exclusive; the delimiter that follows a
/// column sits at `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

/// Compute the span of every column for the current widths.
pub fn column_spans(metrics: &[ColumnMetrics], config: &RenderConfiguration) -> Vec<ColumnSpan> {
    let mut offset = usize::from(config.delimiter_leading);
    metrics
        .iter()
        .map(|m| {
            let span = ColumnSpan {
                start: offset,
                end: offset + m.width(),
            };
            offset = span.end + 1;
            span
        })
        .collect()
}

/// What an emitted line shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Header,
    Divider,
    /// A grid data row, by row index.
    Row(usize),
    /// A record-mode line, by column index.
    Attribute(usize),
}

/// A cell addressed by row and column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

/// Line-by-line description of everything emitted in a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMap {
    lines: Vec<LineKind>,
    record_row: Option<usize>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.record_row = None;
    }

    /// Record a header and its divider.
    pub fn push_header(&mut self) {
        self.lines.push(LineKind::Header);
        self.lines.push(LineKind::Divider);
    }

    /// Record grid rows `rows`.
    pub fn push_rows(&mut self, rows: std::ops::Range<usize>) {
        self.lines.extend(rows.map(LineKind::Row));
    }

    /// Replace the map with a record-mode layout for `row`.
    pub fn set_record(&mut self, row: Option<usize>, columns: usize) {
        self.clear();
        self.push_header();
        self.record_row = row;
        if row.is_some() {
            self.lines.extend((0..columns).map(LineKind::Attribute));
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, line: usize) -> Option<LineKind> {
        self.lines.get(line).copied()
    }

    /// Map a text position to a cell.
    ///
    /// In grid mode header and divider lines resolve to the first row below
    /// them, and an offset past the last column resolves to the last column.
    /// In record mode the line selects the column of the current row, header
    /// lines selecting the first column. Returns `None` for lines that were
    /// never emitted or when there is no cell to land on.
    pub fn hit_test(&self, line: usize, offset: usize, spans: &[ColumnSpan]) -> Option<CellPosition> {
        let kind = self.get(line)?;

        if let Some(row) = self.record_row {
            let column = match kind {
                LineKind::Attribute(column) => column,
                _ => 0,
            };
            return Some(CellPosition { row, column });
        }

        let row = match kind {
            LineKind::Row(row) => row,
            LineKind::Header | LineKind::Divider => {
                self.lines[line..].iter().find_map(|k| match k {
                    LineKind::Row(row) => Some(*row),
                    _ => None,
                })?
            }
            LineKind::Attribute(_) => return None,
        };
        let column = spans
            .iter()
            .position(|s| offset <= s.end)
            .or_else(|| spans.len().checked_sub(1))?;

        Some(CellPosition { row, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnDescriptor, DataKind};

    fn metrics(widths: &[usize]) -> Vec<ColumnMetrics> {
        let config = RenderConfiguration::default();
        widths
            .iter()
            .map(|w| {
                let mut m = ColumnMetrics::new(&ColumnDescriptor::new("x", DataKind::Other), &config);
                m.string_width = *w;
                m
            })
            .collect()
    }

    #[test]
    fn spans_without_leading_delimiter() {
        let spans = column_spans(&metrics(&[3, 5]), &RenderConfiguration::default());
        assert_eq!(
            spans,
            vec![ColumnSpan { start: 0, end: 3 }, ColumnSpan { start: 4, end: 9 }]
        );
    }

    #[test]
    fn spans_shift_with_leading_delimiter() {
        let config = RenderConfiguration::default().with_delimiters(true, false);
        let spans = column_spans(&metrics(&[2, 2]), &config);
        assert_eq!(spans[0], ColumnSpan { start: 1, end: 3 });
        assert_eq!(spans[1], ColumnSpan { start: 4, end: 6 });
    }

    #[test]
    fn grid_hit_test() {
        let spans = column_spans(&metrics(&[3, 5]), &RenderConfiguration::default());
        let mut map = LineMap::new();
        map.push_header();
        map.push_rows(0..3);

        assert_eq!(map.hit_test(2, 0, &spans), Some(CellPosition { row: 0, column: 0 }));
        // the delimiter belongs to the column on its left
        assert_eq!(map.hit_test(3, 3, &spans), Some(CellPosition { row: 1, column: 0 }));
        assert_eq!(map.hit_test(4, 4, &spans), Some(CellPosition { row: 2, column: 1 }));
        assert_eq!(map.hit_test(4, 99, &spans), Some(CellPosition { row: 2, column: 1 }));
        assert_eq!(map.hit_test(0, 5, &spans), Some(CellPosition { row: 0, column: 1 }));
        assert_eq!(map.hit_test(5, 0, &spans), None);
    }

    #[test]
    fn header_without_rows_hits_nothing() {
        let spans = column_spans(&metrics(&[3]), &RenderConfiguration::default());
        let mut map = LineMap::new();
        map.push_header();
        assert_eq!(map.hit_test(0, 0, &spans), None);
    }

    #[test]
    fn reemitted_header_resolves_to_following_row() {
        let spans = column_spans(&metrics(&[3]), &RenderConfiguration::default());
        let mut map = LineMap::new();
        map.push_header();
        map.push_rows(0..2);
        map.push_header();
        map.push_rows(2..3);

        assert_eq!(map.get(4), Some(LineKind::Header));
        assert_eq!(map.hit_test(5, 0, &spans), Some(CellPosition { row: 2, column: 0 }));
    }

    #[test]
    fn record_hit_test() {
        let mut map = LineMap::new();
        map.set_record(Some(4), 3);
        assert_eq!(map.len(), 5);
        assert_eq!(map.hit_test(3, 10, &[]), Some(CellPosition { row: 4, column: 1 }));
        assert_eq!(map.hit_test(0, 0, &[]), Some(CellPosition { row: 4, column: 0 }));

        map.set_record(None, 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.hit_test(0, 0, &[]), None);
    }
}
