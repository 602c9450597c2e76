//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use textgrid::{DataKind, DisplayFormat, RenderConfiguration};

/// Lay out CSV data as an aligned plain-text grid
#[derive(Debug, Parser)]
#[command(name = "textgrid")]
#[command(version)]
#[command(about = "Lay out CSV data as an aligned plain-text grid")]
pub struct Cli {
    /// CSV file to read; standard input when omitted or `-`
    pub input: Option<PathBuf>,

    /// YAML file with render settings; flags override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat the first input line as data; columns are named column1, column2, ...
    #[arg(long)]
    pub no_header: bool,

    /// Force the kind of a column, e.g. `price=numeric` (repeatable)
    #[arg(short, long = "kind", value_name = "NAME=KIND", value_parser = parse_kind_override)]
    pub kinds: Vec<(String, DataKind)>,

    /// Draw `|` at the start and end of every line
    #[arg(short, long)]
    pub borders: bool,

    /// Show nulls (empty fields) as this label
    #[arg(long, value_name = "LABEL")]
    pub null_label: Option<String>,

    /// Show nulls using the configured label
    #[arg(long)]
    pub show_nulls: bool,

    /// Columns per tab character
    #[arg(long, value_name = "N")]
    pub tab_width: Option<usize>,

    /// Maximum width of any column
    #[arg(short = 'w', long, value_name = "N")]
    pub max_width: Option<usize>,

    /// Left-align numbers instead of lining up their decimal marks
    #[arg(long)]
    pub left_numbers: bool,

    /// Left-align dates and times
    #[arg(long)]
    pub left_dates: bool,

    /// Decimal mark used when printing numbers
    #[arg(long, value_name = "CHAR")]
    pub decimal_mark: Option<char>,

    /// Value display format: ui, edit or native
    #[arg(long, value_name = "FORMAT", value_parser = parse_display_format)]
    pub display_format: Option<DisplayFormat>,

    /// Render in chunks of N rows, appending each chunk to the previous output
    #[arg(long, value_name = "N")]
    pub batch: Option<usize>,

    /// Show only row N (zero-based) as a name/value list
    #[arg(short, long, value_name = "N", conflicts_with = "batch")]
    pub record: Option<usize>,

    /// Print column metrics and spans as JSON instead of the grid
    #[arg(long)]
    pub metrics: bool,
}

impl Cli {
    /// Apply the settings given on the command line on top of `config`.
    pub fn apply(&self, mut config: RenderConfiguration) -> RenderConfiguration {
        if self.borders {
            config = config.with_delimiters(true, true);
        }
        if self.show_nulls {
            config = config.with_show_nulls(true);
        }
        if let Some(label) = &self.null_label {
            config = config.with_null_label(label.clone());
        }
        if let Some(width) = self.tab_width {
            config = config.with_tab_width(width);
        }
        if let Some(width) = self.max_width {
            config = config.with_max_column_width(width);
        }
        if self.left_numbers {
            config = config.with_right_justify_numbers(false);
        }
        if self.left_dates {
            config = config.with_right_justify_date_time(false);
        }
        if let Some(format) = self.display_format {
            config = config.with_display_format(format);
        }
        config
    }
}

fn parse_kind_override(s: &str) -> Result<(String, DataKind), String> {
    let (name, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=KIND, got '{}'", s))?;
    let kind = kind.parse::<DataKind>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), kind))
}

fn parse_display_format(s: &str) -> Result<DisplayFormat, String> {
    s.parse().map_err(|e: textgrid::LayoutError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_overrides() {
        let cli = Cli::try_parse_from(["textgrid", "-k", "price=numeric", "--kind", "day=date"])
            .unwrap();
        assert_eq!(
            cli.kinds,
            vec![
                ("price".to_string(), DataKind::Numeric),
                ("day".to_string(), DataKind::DateTime)
            ]
        );
    }

    #[test]
    fn rejects_malformed_kind() {
        assert!(Cli::try_parse_from(["textgrid", "--kind", "price"]).is_err());
        assert!(Cli::try_parse_from(["textgrid", "--kind", "price=money"]).is_err());
    }

    #[test]
    fn record_conflicts_with_batch() {
        assert!(Cli::try_parse_from(["textgrid", "--record", "1", "--batch", "2"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "textgrid",
            "--borders",
            "--null-label",
            "<NULL>",
            "-w",
            "12",
            "--display-format",
            "native",
        ])
        .unwrap();
        let config = cli.apply(RenderConfiguration::default().with_max_column_width(40));

        assert!(config.delimiter_leading && config.delimiter_trailing);
        assert!(config.show_nulls);
        assert_eq!(config.null_label, "<NULL>");
        assert_eq!(config.max_column_width, 12);
        assert_eq!(config.display_format, DisplayFormat::Native);
        assert_eq!(config.tab_width, 4);
    }
}
