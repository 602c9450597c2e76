//! # textgrid - Plain-Text Result Grid Layout
//!
//! `textgrid` turns typed result rows into fixed-width, aligned plain text.
//! It discovers column widths, lines numbers up on their decimal separator,
//! expands tabs, truncates under a maximum column width, renders nulls, and
//! appends new rows to already displayed text without re-scanning the old
//! ones.
//!
//! ## Core Concepts
//!
//! - [`LayoutEngine`]: session state and the `begin_session`/`render`/`reset`
//!   facade
//! - [`RenderConfiguration`]: justification, delimiters, null label, tab and
//!   column widths
//! - [`ColumnDescriptor`] and [`DataKind`]: what the engine needs to know
//!   about each column
//! - [`ValueFormatter`]: the host's way of turning raw values into text
//! - [`RenderMode`]: grid (all rows) or record (one row as name/value pairs)
//!
//! ## Quick Start
//!
//! ```rust
//! use textgrid::{
//!     ColumnDescriptor, DataKind, LayoutEngine, PlainFormatter, RenderConfiguration,
//!     RenderMode, Value,
//! };
//!
//! let mut engine = LayoutEngine::new();
//! engine
//!     .begin_session(
//!         vec![
//!             ColumnDescriptor::new("name", DataKind::Other),
//!             ColumnDescriptor::new("price", DataKind::Numeric),
//!         ],
//!         RenderConfiguration::default().with_delimiters(true, true),
//!     )
//!     .unwrap();
//!
//! let rows = vec![
//!     vec![Value::from("tea"), Value::Float(2.5)],
//!     vec![Value::from("cake"), Value::Float(12.75)],
//! ];
//! let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);
//!
//! assert_eq!(
//!     out.text,
//!     "|name|price|\n|----|-----|\n|tea | 2.5 |\n|cake|12.75|"
//! );
//! ```
//!
//! ## Incremental Append
//!
//! Pass the full row list with `append = true` and only the rows added since
//! the previous render are laid out. The returned chunk starts with a line
//! break and carries a new header when a column had to grow.
//!
//! ## Hosting
//!
//! Implement [`ValueFormatter`] for your own value type to plug the engine
//! into a host. The `textgrid` binary in `textgrid-cli` is an example host
//! that renders CSV files.

pub mod cell;
pub mod column;
pub mod config;
pub mod engine;
mod error;
pub mod grid;
pub mod metrics;
pub mod position;
pub mod record;
pub mod resolve;
pub mod util;
pub mod value;

pub use error::{CellError, LayoutError, Result};

pub use cell::{render_cell, NEWLINE_GLYPH};
pub use column::{ColumnDescriptor, DataKind};
pub use config::{DisplayFormat, RenderConfiguration, DEFAULT_NULL_LABEL};
pub use engine::{LayoutEngine, OutputKind, RenderMode, RenderOutput};
pub use grid::{GridEmit, GridRenderer};
pub use metrics::ColumnMetrics;
pub use position::{column_spans, CellPosition, ColumnSpan, LineKind, LineMap};
pub use record::{RecordRenderer, RecordWidths};
pub use resolve::{detect_decimal_separator, WidthResolver, DEFAULT_DECIMAL_SEPARATOR};
pub use value::{PlainFormatter, Value, ValueFormatter};
