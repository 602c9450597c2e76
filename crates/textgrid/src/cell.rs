//! Cell text production: the single point where raw values become text.

use crate::column::ColumnDescriptor;
use crate::config::RenderConfiguration;
use crate::value::ValueFormatter;

/// Glyph shown in place of a line break inside a cell.
pub const NEWLINE_GLYPH: char = '\u{00B6}';

/// Produce the display text for one cell.
///
/// `value` is `None` when the row is shorter than the column list; such cells
/// are treated as null. Formatter failures are rendered as the error title.
/// The result never contains `\n`, `\r` or NUL, so every row stays on one
/// line.
pub fn render_cell<F: ValueFormatter>(
    formatter: &F,
    column: &ColumnDescriptor,
    value: Option<&F::Value>,
    config: &RenderConfiguration,
) -> String {
    let text = match value {
        None => null_text(config),
        Some(value) => {
            if let Some(title) = formatter.error_title(value) {
                title
            } else {
                match formatter.format_value(column, value, config.display_format) {
                    Ok(text) if text.is_empty() && formatter.is_null(value) => null_text(config),
                    Ok(text) => text,
                    Err(err) => err.title,
                }
            }
        }
    };
    sanitize(&text)
}

/// Header text for a column: its display name, sanitized like cell text.
pub fn header_text(column: &ColumnDescriptor) -> String {
    sanitize(column.display_name())
}

fn null_text(config: &RenderConfiguration) -> String {
    if config.show_nulls {
        config.null_label.clone()
    } else {
        String::new()
    }
}

/// Replace characters that would break the one-row-per-line layout.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push(NEWLINE_GLYPH),
            '\r' => {}
            '\0' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
