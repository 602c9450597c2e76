//! `textgrid`: render CSV as an aligned plain-text grid.
//!
//! Rows are fed to the layout engine in batches through its append protocol,
//! so large inputs start printing before they are fully read.

mod args;
mod input;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use serde::Serialize;
use textgrid::{
    ColumnDescriptor, ColumnMetrics, ColumnSpan, LayoutEngine, PlainFormatter,
    RenderConfiguration, RenderMode, Value,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::Cli;
use crate::input::{infer_columns, to_values, TableReader};

/// Rows read before the first render when no batch size is given.
const UNBATCHED: usize = usize::MAX;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", Style::new().red().bold().apply_to("error:"), err);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn load_config(cli: &Cli) -> Result<RenderConfiguration> {
    let base = match &cli.config {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            RenderConfiguration::from_yaml(&yaml)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => RenderConfiguration::default(),
    };
    Ok(cli.apply(base))
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let formatter = cli
        .decimal_mark
        .map(PlainFormatter::with_decimal_mark)
        .unwrap_or_default();

    let mut reader = TableReader::open(cli.input.as_deref(), cli.delimiter, !cli.no_header)?;
    let batch_size = match cli.batch {
        Some(0) => anyhow::bail!("batch size must be greater than zero"),
        Some(n) => n,
        None => UNBATCHED,
    };

    let first = reader.next_batch(batch_size)?;
    let overrides: HashMap<_, _> = cli.kinds.iter().cloned().collect();
    let columns = infer_columns(reader.headers(), &first, &overrides);
    tracing::info!(
        columns = columns.len(),
        numeric = columns.iter().filter(|c| c.kind == textgrid::DataKind::Numeric).count(),
        "input columns resolved"
    );

    let mut engine = LayoutEngine::new();
    engine.begin_session(columns.clone(), config)?;

    let mut rows: Vec<Vec<Value>> = first.iter().map(|r| to_values(r, &columns)).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(index) = cli.record {
        // record mode needs the row itself, not just the first batch
        loop {
            let more = reader.next_batch(UNBATCHED)?;
            if more.is_empty() {
                break;
            }
            rows.extend(more.iter().map(|r| to_values(r, &columns)));
        }
        if index >= rows.len() {
            tracing::warn!(index, rows = rows.len(), "record index past the last row");
        }
        let output = engine.render(&formatter, &rows, RenderMode::Record { row: Some(index) }, false);
        if cli.metrics {
            return write_metrics(&mut out, &engine);
        }
        return writeln!(out, "{}", output.text).context("cannot write output");
    }

    let output = engine.render(&formatter, &rows, RenderMode::Grid, false);
    release(&mut rows[..]);
    if !cli.metrics {
        write!(out, "{}", output.text).context("cannot write output")?;
    }

    loop {
        let batch = reader.next_batch(batch_size)?;
        if batch.is_empty() {
            break;
        }
        let start = rows.len();
        rows.extend(batch.iter().map(|r| to_values(r, &columns)));
        let output = engine.render(&formatter, &rows, RenderMode::Grid, true);
        release(&mut rows[start..]);
        if !cli.metrics {
            write!(out, "{}", output.text).context("cannot write output")?;
            out.flush().context("cannot write output")?;
        }
    }

    if cli.metrics {
        return write_metrics(&mut out, &engine);
    }
    writeln!(out).context("cannot write output")
}

/// Drop the values of rendered rows, keeping their slots so the row count
/// stays right; appends only read rows past them.
fn release(rows: &mut [Vec<Value>]) {
    rows.iter_mut().for_each(|row| *row = Vec::new());
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsReport<'a> {
    columns: &'a [ColumnDescriptor],
    metrics: &'a [ColumnMetrics],
    widths: Vec<usize>,
    spans: Vec<ColumnSpan>,
    rendered_rows: usize,
    decimal_separator: Option<char>,
}

fn write_metrics(out: &mut impl Write, engine: &LayoutEngine) -> Result<()> {
    let report = MetricsReport {
        columns: engine.columns(),
        metrics: engine.metrics(),
        widths: engine.metrics().iter().map(ColumnMetrics::width).collect(),
        spans: engine.column_spans(),
        rendered_rows: engine.rendered_rows(),
        decimal_separator: engine.decimal_separator(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("cannot write metrics")?;
    writeln!(out).context("cannot write output")
}
