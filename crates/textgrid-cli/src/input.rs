//! CSV input: column discovery, kind inference and value conversion.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{StringRecord, StringRecordsIntoIter};
use textgrid::{ColumnDescriptor, DataKind, Value};

/// Reads CSV records in batches.
pub struct TableReader {
    headers: Vec<String>,
    records: StringRecordsIntoIter<Box<dyn Read>>,
}

impl TableReader {
    /// Open `path`, or standard input for `None` and `-`.
    pub fn open(path: Option<&Path>, delimiter: char, has_headers: bool) -> Result<Self> {
        let source: Box<dyn Read> = match path {
            Some(p) if p != Path::new("-") => Box::new(
                File::open(p).with_context(|| format!("cannot open {}", p.display()))?,
            ),
            _ => Box::new(io::stdin()),
        };
        if !delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", delimiter);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(has_headers)
            .flexible(true)
            .from_reader(source);

        // without headers this peeks at the first record, which is still
        // yielded as data
        let first = reader.headers().context("cannot read CSV header")?;
        let headers = if has_headers {
            first.iter().map(str::to_string).collect()
        } else {
            (1..=first.len()).map(|i| format!("column{}", i)).collect()
        };

        Ok(Self {
            headers,
            records: reader.into_records(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Read up to `limit` records; an empty batch means the input is done.
    pub fn next_batch(&mut self, limit: usize) -> Result<Vec<StringRecord>> {
        let mut batch = Vec::new();
        for record in self.records.by_ref().take(limit) {
            batch.push(record.context("malformed CSV record")?);
        }
        Ok(batch)
    }
}

/// Decide each column's kind.
///
/// Explicit `overrides` win. Otherwise a column is numeric when every
/// non-empty field in `sample` is a finite number and at least one is
/// present.
pub fn infer_columns(
    headers: &[String],
    sample: &[StringRecord],
    overrides: &HashMap<String, DataKind>,
) -> Vec<ColumnDescriptor> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = overrides.get(name).copied().unwrap_or_else(|| {
                let mut fields = sample
                    .iter()
                    .filter_map(|r| r.get(i))
                    .filter(|f| !f.trim().is_empty())
                    .peekable();
                if fields.peek().is_some() && fields.all(is_number) {
                    DataKind::Numeric
                } else {
                    DataKind::Other
                }
            });
            ColumnDescriptor::new(name.clone(), kind)
        })
        .collect()
}

/// Convert a record to engine values. Empty fields are nulls.
pub fn to_values(record: &StringRecord, columns: &[ColumnDescriptor]) -> Vec<Value> {
    record
        .iter()
        .zip(columns)
        .map(|(field, column)| {
            let trimmed = field.trim();
            if trimmed.is_empty() {
                return Value::Null;
            }
            if column.kind == DataKind::Numeric {
                if let Ok(v) = trimmed.parse::<i64>() {
                    return Value::Integer(v);
                }
                if let Ok(v) = trimmed.parse::<f64>() {
                    if v.is_finite() {
                        return Value::Float(v);
                    }
                }
            }
            Value::Text(field.to_string())
        })
        .collect()
}

fn is_number(field: &str) -> bool {
    field.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn infers_numeric_columns() {
        let headers = vec!["name".to_string(), "qty".to_string(), "blank".to_string()];
        let sample = vec![record(&["a", "1", ""]), record(&["b", "2.5", ""]), record(&["c", "", ""])];

        let columns = infer_columns(&headers, &sample, &HashMap::new());
        let kinds: Vec<DataKind> = columns.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![DataKind::Other, DataKind::Numeric, DataKind::Other]);
    }

    #[test]
    fn overrides_win() {
        let headers = vec!["code".to_string(), "day".to_string()];
        let sample = vec![record(&["007", "2024-01-01"])];
        let overrides = HashMap::from([
            ("code".to_string(), DataKind::Other),
            ("day".to_string(), DataKind::DateTime),
        ]);

        let columns = infer_columns(&headers, &sample, &overrides);
        assert_eq!(columns[0].kind, DataKind::Other);
        assert_eq!(columns[1].kind, DataKind::DateTime);
    }

    #[test]
    fn special_floats_are_not_numbers() {
        assert!(is_number(" 12.5 "));
        assert!(!is_number("NaN"));
        assert!(!is_number("inf"));
        assert!(!is_number("12a"));
    }

    #[test]
    fn converts_fields() {
        let columns = vec![
            ColumnDescriptor::new("n", DataKind::Numeric),
            ColumnDescriptor::new("s", DataKind::Other),
        ];
        assert_eq!(
            to_values(&record(&["42", "42"]), &columns),
            vec![Value::Integer(42), Value::from("42")]
        );
        assert_eq!(
            to_values(&record(&["1.5", ""]), &columns),
            vec![Value::Float(1.5), Value::Null]
        );
        assert_eq!(
            to_values(&record(&["n/a"]), &columns),
            vec![Value::from("n/a")]
        );
    }
}
