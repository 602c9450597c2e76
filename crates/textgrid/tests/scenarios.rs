//! End-to-end layouts through the engine facade.

use textgrid::{
    CellError, CellPosition, ColumnDescriptor, DataKind, DisplayFormat, LayoutEngine, OutputKind,
    PlainFormatter, RenderConfiguration, RenderMode, Value, ValueFormatter,
};

fn text_rows(values: &[&str]) -> Vec<Vec<Value>> {
    values.iter().map(|v| vec![Value::from(*v)]).collect()
}

fn session(columns: Vec<ColumnDescriptor>, config: RenderConfiguration) -> LayoutEngine {
    let mut engine = LayoutEngine::new();
    engine.begin_session(columns, config).unwrap();
    engine
}

#[test]
fn id_column_renders_five_lines() {
    let mut engine = session(
        vec![ColumnDescriptor::new("ID", DataKind::Numeric)],
        RenderConfiguration::default().with_max_column_width(10),
    );
    let rows = text_rows(&["1", "22", "333"]);

    let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);

    // the divider spans the column width of 3, not the header's 2
    assert_eq!(out.text, " ID\n---\n  1\n 22\n333");
    assert_eq!(out.text.lines().count(), 5);
    assert_eq!(out.kind, OutputKind::Replace);
    assert!(out.header_emitted);
    assert_eq!(out.rows_emitted, 3);
}

#[test]
fn narrow_append_emits_only_new_lines() {
    let mut engine = session(
        vec![ColumnDescriptor::new("ID", DataKind::Numeric)],
        RenderConfiguration::default().with_max_column_width(10),
    );
    let fmt = PlainFormatter::new();
    let mut rows = text_rows(&["1", "22", "333"]);
    engine.render(&fmt, &rows, RenderMode::Grid, false);

    rows.extend(text_rows(&["4", "55"]));
    let out = engine.render(&fmt, &rows, RenderMode::Grid, true);

    assert_eq!(out.kind, OutputKind::Append);
    assert_eq!(out.text, "\n  4\n 55");
    assert!(!out.header_emitted);
    assert!(!out.widths_changed);
    assert_eq!(out.rows_emitted, 2);
}

#[test]
fn wider_append_reemits_header() {
    let mut engine = session(
        vec![ColumnDescriptor::new("ID", DataKind::Numeric)],
        RenderConfiguration::default(),
    );
    let fmt = PlainFormatter::new();
    let mut rows = text_rows(&["1", "22"]);
    engine.render(&fmt, &rows, RenderMode::Grid, false);

    rows.extend(text_rows(&["4444"]));
    let out = engine.render(&fmt, &rows, RenderMode::Grid, true);

    assert!(out.widths_changed);
    assert!(out.header_emitted);
    assert_eq!(out.text, "\n  ID\n----\n4444");
    // earlier lines stay as they were; the line map still has them
    assert_eq!(engine.line_map().map(|m| m.len()), Some(7));
    assert_eq!(engine.hit_test(4, 0), Some(CellPosition { row: 2, column: 0 }));
}

#[test]
fn long_values_truncate_to_max_width() {
    let mut engine = session(
        vec![ColumnDescriptor::new("comment", DataKind::Other)],
        RenderConfiguration::default().with_max_column_width(8),
    );
    let rows = text_rows(&["this value is far too long"]);

    let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);
    let lines: Vec<&str> = out.text.lines().collect();

    assert_eq!(lines[0], "comment ");
    assert_eq!(lines[2], "this val");
    assert_eq!(lines[2].chars().count(), 8);
}

#[test]
fn null_cells_show_label() {
    let mut engine = session(
        vec![
            ColumnDescriptor::new("name", DataKind::Other),
            ColumnDescriptor::new("nick", DataKind::Other),
        ],
        RenderConfiguration::default()
            .with_null_label("<NULL>")
            .with_delimiters(true, true),
    );
    let rows = vec![
        vec![Value::from("alice"), Value::Null],
        vec![Value::from("bob"), Value::from("b")],
    ];

    let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);
    assert_eq!(
        out.text,
        "|name  |nick  |\n|------|------|\n|alice |<NULL>|\n|bob   |b     |"
    );
}

#[test]
fn hidden_nulls_render_blank() {
    let mut engine = session(
        vec![ColumnDescriptor::new("v", DataKind::Other)],
        RenderConfiguration::default(),
    );
    let rows = vec![vec![Value::Null], vec![Value::from("x")]];

    let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);
    assert_eq!(out.text, "v\n-\n \nx");
}

#[test]
fn comma_locale_aligns_on_comma() {
    let mut engine = session(
        vec![ColumnDescriptor::new("amount", DataKind::Numeric)],
        RenderConfiguration::default(),
    );
    let rows = vec![
        vec![Value::Float(1.5)],
        vec![Value::Float(10.25)],
        vec![Value::Integer(300)],
    ];

    let out = engine.render(
        &PlainFormatter::with_decimal_mark(','),
        &rows,
        RenderMode::Grid,
        false,
    );

    assert_eq!(engine.decimal_separator(), Some(','));
    let lines: Vec<&str> = out.text.lines().collect();
    assert_eq!(lines[0], "amount");
    assert_eq!(lines[2], "  1,5 ");
    assert_eq!(lines[3], " 10,25");
    assert_eq!(lines[4], "300   ");
}

#[test]
fn decimal_points_share_a_column() {
    let mut engine = session(
        vec![ColumnDescriptor::new("n", DataKind::Numeric)],
        RenderConfiguration::default(),
    );
    let rows = text_rows(&["12.5", "3.14159", "100"]);

    let out = engine.render(&PlainFormatter::new(), &rows, RenderMode::Grid, false);
    let points: Vec<Option<usize>> = out
        .text
        .lines()
        .skip(2)
        .take(2)
        .map(|l| l.find('.'))
        .collect();
    assert_eq!(points, vec![Some(3), Some(3)]);
}

#[test]
fn labels_replace_names_in_header() {
    let mut engine = session(
        vec![ColumnDescriptor::new("usr_nm", DataKind::Other).label("User")],
        RenderConfiguration::default(),
    );
    let out = engine.render(&PlainFormatter::new(), &text_rows(&["amy"]), RenderMode::Grid, false);
    assert_eq!(out.text, "User\n----\namy ");
}

#[test]
fn line_breaks_in_names_keep_one_header_line() {
    let mut engine = session(
        vec![ColumnDescriptor::new("a\nb", DataKind::Other)],
        RenderConfiguration::default(),
    );
    let out = engine.render(&PlainFormatter::new(), &text_rows(&["x"]), RenderMode::Grid, false);

    assert_eq!(out.text, "a\u{b6}b\n---\nx  ");
    assert_eq!(out.text.split('\n').count(), 3);
    assert_eq!(engine.hit_test(2, 0), Some(CellPosition { row: 0, column: 0 }));
}

#[test]
fn record_mode_lists_current_row() {
    let mut engine = session(
        vec![
            ColumnDescriptor::new("id", DataKind::Numeric),
            ColumnDescriptor::new("note", DataKind::Other),
        ],
        RenderConfiguration::default().with_null_label("<NULL>"),
    );
    let rows = vec![
        vec![Value::Integer(1), Value::from("first\nsecond")],
        vec![Value::Integer(2), Value::Null],
    ];
    let fmt = PlainFormatter::new();

    let out = engine.render(&fmt, &rows, RenderMode::Record { row: Some(0) }, false);
    assert_eq!(
        out.text,
        "Name|Value       \n----|------------\nid  |1           \nnote|first\u{b6}second"
    );

    let out = engine.render(&fmt, &rows, RenderMode::Record { row: Some(1) }, false);
    assert_eq!(out.text.lines().last(), Some("note|<NULL>"));
}

/// Formatter whose every call fails, to check failures stay inside cells.
struct Broken;

impl ValueFormatter for Broken {
    type Value = Value;

    fn format_value(
        &self,
        _column: &ColumnDescriptor,
        _value: &Value,
        _format: DisplayFormat,
    ) -> Result<String, CellError> {
        Err(CellError::new("#ERR"))
    }

    fn is_null(&self, value: &Value) -> bool {
        matches!(value, Value::Null)
    }

    fn format_decimal_sample(
        &self,
        _column: &ColumnDescriptor,
        _format: DisplayFormat,
    ) -> Result<String, CellError> {
        Err(CellError::new("no sample"))
    }
}

#[test]
fn formatter_failures_become_cell_text() {
    let mut engine = session(
        vec![ColumnDescriptor::new("n", DataKind::Numeric)],
        RenderConfiguration::default(),
    );
    let out = engine.render(&Broken, &text_rows(&["1"]), RenderMode::Grid, false);

    assert_eq!(engine.decimal_separator(), Some('.'));
    assert_eq!(out.text, "   n\n----\n#ERR");
}

#[test]
fn new_session_discards_widths() {
    let fmt = PlainFormatter::new();
    let mut engine = session(
        vec![ColumnDescriptor::new("s", DataKind::Other)],
        RenderConfiguration::default(),
    );
    engine.render(&fmt, &text_rows(&["a long value"]), RenderMode::Grid, false);

    engine
        .begin_session(
            vec![ColumnDescriptor::new("s", DataKind::Other)],
            RenderConfiguration::default(),
        )
        .unwrap();
    let out = engine.render(&fmt, &text_rows(&["ab"]), RenderMode::Grid, true);

    assert_eq!(out.kind, OutputKind::Replace);
    assert_eq!(out.text, "s \n--\nab");
}

#[test]
fn tabs_count_as_tab_width() {
    let mut engine = session(
        vec![ColumnDescriptor::new("t", DataKind::Other)],
        RenderConfiguration::default().with_tab_width(2),
    );
    let out = engine.render(&PlainFormatter::new(), &text_rows(&["a\tb"]), RenderMode::Grid, false);

    assert_eq!(engine.metrics()[0].width(), 4);
    assert_eq!(out.text, "t   \n----\na\tb");
}
