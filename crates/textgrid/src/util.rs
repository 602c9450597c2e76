//! Width measurement, clipping and padding for grid cells.
//!
//! Widths are measured in display columns using Unicode widths, with one
//! exception: a tab counts as `tab_width` columns. Tabs are kept in the output
//! as-is, so the host's tab stops decide where they land; the extra columns
//! only reserve room for them.

use unicode_width::UnicodeWidthChar;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
}

fn char_width(c: char, tab_width: usize) -> usize {
    if c == '\t' {
        tab_width
    } else {
        c.width().unwrap_or(0)
    }
}

/// Returns the display width of a string, expanding each tab to `tab_width`.
///
/// # Example
///
/// ```rust
/// use textgrid::util::display_width;
///
/// assert_eq!(display_width("hello", 4), 5);
/// assert_eq!(display_width("a\tb", 4), 6);
/// assert_eq!(display_width("日本", 4), 4);
/// ```
pub fn display_width(s: &str, tab_width: usize) -> usize {
    s.chars().map(|c| char_width(c, tab_width)).sum()
}

/// Hard-cuts a string so its display width does not exceed `max_width`.
///
/// No marker is added. A wide character that would straddle the limit is
/// dropped entirely.
///
/// ```rust
/// use textgrid::util::clip;
///
/// assert_eq!(clip("Hello World", 5, 4), "Hello");
/// assert_eq!(clip("Short", 10, 4), "Short");
/// ```
pub fn clip(s: &str, max_width: usize, tab_width: usize) -> String {
    if display_width(s, tab_width) <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let w = char_width(c, tab_width);
        if current_width + w > max_width {
            break;
        }
        result.push(c);
        current_width += w;
    }
    result
}

/// Pads `s` with spaces to `width` display columns.
///
/// Strings already at or beyond `width` are returned unchanged.
///
/// ```rust
/// use textgrid::util::{pad, Align};
///
/// assert_eq!(pad("42", 5, 4, Align::Right), "   42");
/// assert_eq!(pad("42", 5, 4, Align::Left), "42   ");
/// assert_eq!(pad("hello", 3, 4, Align::Left), "hello");
/// ```
pub fn pad(s: &str, width: usize, tab_width: usize, align: Align) -> String {
    let fill = width.saturating_sub(display_width(s, tab_width));
    let mut out = String::with_capacity(s.len() + fill);
    match align {
        Align::Left => {
            out.push_str(s);
            push_spaces(&mut out, fill);
        }
        Align::Right => {
            push_spaces(&mut out, fill);
            out.push_str(s);
        }
    }
    out
}

/// Appends `count` spaces to `out`.
pub fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Splits a numeric display string at the first `separator`.
///
/// Returns the display widths of the integer and fractional parts. Without a
/// separator the whole string is the integer part.
///
/// ```rust
/// use textgrid::util::split_decimal;
///
/// assert_eq!(split_decimal("3.14159", '.', 4), (1, 5));
/// assert_eq!(split_decimal("100", '.', 4), (3, 0));
/// assert_eq!(split_decimal("1,5", ',', 4), (1, 1));
/// ```
pub fn split_decimal(s: &str, separator: char, tab_width: usize) -> (usize, usize) {
    match s.split_once(separator) {
        Some((int, frac)) => (display_width(int, tab_width), display_width(frac, tab_width)),
        None => (display_width(s, tab_width), 0),
    }
}
