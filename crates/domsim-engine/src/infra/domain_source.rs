//! Domain list loading
//!
//! Reads a columnar dataset (Parquet, CSV/TSV, JSON, JSON Lines or plain
//! text) and returns the domains of its first text-typed column, in row order.

use crate::constants::LINE_INPUT_COLUMN;
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Domain loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input path does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// Dataset has no rows
    #[error("input contains no data rows")]
    EmptyInput,
    /// Dataset has rows but no text-typed column
    #[error("input has no text column")]
    NoTextColumn,
    /// Every value of the domain column was null or empty
    #[error("no valid domains found in column '{column}'")]
    NoValidDomains { column: String },
    /// Dataset shape is not supported
    #[error("unsupported input layout: {0}")]
    InvalidLayout(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

/// Supported input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Apache Parquet (any supported compression)
    Parquet,
    /// Delimited text with a header row
    Delimited(u8),
    /// JSON array of records/rows, or object of columns
    Json,
    /// One JSON record per line
    JsonLines,
    /// One domain per line
    Lines,
}

impl InputFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("parquet") | Some("pq") => Self::Parquet,
            Some("csv") => Self::Delimited(b','),
            Some("tsv") => Self::Delimited(b'\t'),
            Some("json") => Self::Json,
            Some("jsonl") | Some("ndjson") => Self::JsonLines,
            _ => Self::Lines,
        }
    }
}

/// A single dataset value
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Number(String),
    Bool(bool),
    /// Nested value, kept as its JSON text
    Other(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Classify a raw delimited-text field
    fn from_field(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() {
            Cell::Null
        } else if field.eq_ignore_ascii_case("true") {
            Cell::Bool(true)
        } else if field.eq_ignore_ascii_case("false") {
            Cell::Bool(false)
        } else if field.parse::<f64>().is_ok() {
            Cell::Number(field.to_string())
        } else {
            Cell::Text(field.to_string())
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(n) => Cell::Number(n.to_string()),
            Value::Bool(b) => Cell::Bool(*b),
            other => Cell::Other(other.to_string()),
        }
    }

    /// Stringified, trimmed value; `None` for nulls and blanks
    pub fn to_domain(&self) -> Option<String> {
        let text = match self {
            Cell::Null => return None,
            Cell::Text(s) | Cell::Number(s) | Cell::Other(s) => s.trim().to_string(),
            Cell::Bool(b) => b.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Untyped dataset: column names and rows of cells
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    /// Every row has `columns.len()` cells
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}

/// Metadata about the loaded source
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    /// Rows in the dataset, including those without a usable domain
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub domain_column: String,
    pub file_size: u64,
}

/// Domains ready for analysis, in row order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainDataset {
    pub domains: Vec<String>,
    pub info: SourceInfo,
}

/// Load the domain list from a file
///
/// # Errors
///
/// `InputNotFound` for a missing path, `EmptyInput` for a dataset without
/// rows, `NoTextColumn` when no column holds strings and `NoValidDomains`
/// when the selected column has only nulls or blanks.
pub fn load_domains(path: impl AsRef<Path>) -> Result<DomainDataset, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::InputNotFound(path.to_path_buf()));
    }

    let format = InputFormat::from_path(path);
    let file_size = fs::metadata(path)?.len();
    info!(path = %path.display(), ?format, file_size, "loading domains");

    let table = read_table(path, format)?;
    if table.rows.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    let column = select_domain_column(&table).ok_or(LoadError::NoTextColumn)?;
    let domain_column = table.columns[column].clone();
    debug!(column = %domain_column, "selected domain column");

    let domains = extract_domains(&table, column);
    if domains.is_empty() {
        return Err(LoadError::NoValidDomains {
            column: domain_column,
        });
    }

    info!(
        rows = table.rows.len(),
        domains = domains.len(),
        "domains loaded"
    );

    Ok(DomainDataset {
        domains,
        info: SourceInfo {
            path: path.to_path_buf(),
            total_rows: table.rows.len(),
            columns: table.columns,
            domain_column,
            file_size,
        },
    })
}

/// Index of the first text-typed column
///
/// A column is text-typed when its first non-null value is a string.
pub fn select_domain_column(table: &RawTable) -> Option<usize> {
    (0..table.columns.len()).find(|&column| {
        matches!(
            table.column_cells(column).find(|cell| !cell.is_null()),
            Some(Cell::Text(_))
        )
    })
}

/// Non-null, non-blank values of a column, in row order
pub fn extract_domains(table: &RawTable, column: usize) -> Vec<String> {
    table
        .column_cells(column)
        .filter_map(Cell::to_domain)
        .collect()
}

/// Read a file into a `RawTable`
pub fn read_table(path: &Path, format: InputFormat) -> Result<RawTable, LoadError> {
    match format {
        InputFormat::Parquet => read_parquet(path),
        InputFormat::Delimited(delimiter) => read_delimited(path, delimiter),
        InputFormat::Json => {
            let reader = BufReader::new(File::open(path)?);
            let value: Value = serde_json::from_reader(reader)?;
            table_from_json(value)
        }
        InputFormat::JsonLines => {
            let reader = BufReader::new(File::open(path)?);
            let mut records = Vec::new();
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(serde_json::from_str::<Value>(&line)?);
            }
            table_from_json(Value::Array(records))
        }
        InputFormat::Lines => read_lines(path),
    }
}

fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut cells = batch
            .columns()
            .iter()
            .map(|array| arrow_cells(array.as_ref()).map(Vec::into_iter))
            .collect::<Result<Vec<_>, _>>()?;

        for _ in 0..batch.num_rows() {
            rows.push(
                cells
                    .iter_mut()
                    .map(|column| column.next().unwrap_or(Cell::Null))
                    .collect(),
            );
        }
    }

    Ok(RawTable { columns, rows })
}

/// Cells of one Arrow column
///
/// String columns (plain, large, view or dictionary-encoded) become text;
/// everything else keeps its display form.
fn arrow_cells(array: &dyn Array) -> Result<Vec<Cell>, ArrowError> {
    let cells = match array.data_type() {
        DataType::Utf8 => text_cells(array.as_string::<i32>().iter()),
        DataType::LargeUtf8 => text_cells(array.as_string::<i64>().iter()),
        DataType::Utf8View => text_cells(array.as_string_view().iter()),
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(|v| v.map_or(Cell::Null, Cell::Bool))
            .collect(),
        DataType::Dictionary(_, values)
            if matches!(**values, DataType::Utf8 | DataType::LargeUtf8) =>
        {
            let decoded = arrow::compute::cast(array, &DataType::Utf8)?;
            return arrow_cells(decoded.as_ref());
        }
        data_type => {
            let numeric = data_type.is_numeric();
            let mut cells = Vec::with_capacity(array.len());
            for row in 0..array.len() {
                if array.is_null(row) {
                    cells.push(Cell::Null);
                    continue;
                }
                let value = array_value_to_string(array, row)?;
                cells.push(if numeric {
                    Cell::Number(value)
                } else {
                    Cell::Other(value)
                });
            }
            cells
        }
    };

    Ok(cells)
}

fn text_cells<'s>(values: impl Iterator<Item = Option<&'s str>>) -> Vec<Cell> {
    values
        .map(|v| v.map_or(Cell::Null, |s| Cell::Text(s.to_string())))
        .collect()
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let row = (0..columns.len())
            .map(|i| record.get(i).map_or(Cell::Null, Cell::from_field))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn read_lines(path: &Path) -> Result<RawTable, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        let cell = if trimmed.is_empty() {
            Cell::Null
        } else {
            Cell::Text(trimmed.to_string())
        };
        rows.push(vec![cell]);
    }

    // Trailing blank lines are not rows
    while rows.last().is_some_and(|row| row[0].is_null()) {
        rows.pop();
    }

    Ok(RawTable {
        columns: vec![LINE_INPUT_COLUMN.to_string()],
        rows,
    })
}

/// Build a table from the JSON layouts a dataframe export produces
///
/// - `[{"col": value, ...}, ...]` (records)
/// - `[[value, ...], ...]` (rows)
/// - `{"col": [value, ...], ...}` (columns)
pub fn table_from_json(value: Value) -> Result<RawTable, LoadError> {
    match value {
        Value::Array(items) => match items.first() {
            None => Ok(RawTable::default()),
            Some(Value::Object(first)) => {
                let columns: Vec<String> = first.keys().cloned().collect();
                let rows = items
                    .iter()
                    .map(|item| {
                        columns
                            .iter()
                            .map(|c| item.get(c).map_or(Cell::Null, Cell::from_json))
                            .collect()
                    })
                    .collect();
                Ok(RawTable { columns, rows })
            }
            Some(Value::Array(_)) => {
                let width = items
                    .iter()
                    .map(|item| item.as_array().map_or(0, Vec::len))
                    .max()
                    .unwrap_or(0);
                let columns = (0..width).map(|i| format!("column_{}", i)).collect();
                let rows = items
                    .iter()
                    .map(|item| {
                        (0..width)
                            .map(|i| item.get(i).map_or(Cell::Null, Cell::from_json))
                            .collect()
                    })
                    .collect();
                Ok(RawTable { columns, rows })
            }
            Some(_) => {
                // A bare list of scalars is a single column
                let rows = items.iter().map(|v| vec![Cell::from_json(v)]).collect();
                Ok(RawTable {
                    columns: vec![LINE_INPUT_COLUMN.to_string()],
                    rows,
                })
            }
        },
        Value::Object(map) => {
            let columns: Vec<String> = map.keys().cloned().collect();
            let mut data: Vec<&Vec<Value>> = Vec::with_capacity(map.len());
            for (name, values) in &map {
                match values {
                    Value::Array(values) => data.push(values),
                    _ => {
                        return Err(LoadError::InvalidLayout(format!(
                            "column '{}' is not an array",
                            name
                        )));
                    }
                }
            }

            let height = data.iter().map(|values| values.len()).max().unwrap_or(0);
            let rows = (0..height)
                .map(|r| {
                    data.iter()
                        .map(|values| values.get(r).map_or(Cell::Null, Cell::from_json))
                        .collect()
                })
                .collect();
            Ok(RawTable { columns, rows })
        }
        _ => Err(LoadError::InvalidLayout(
            "expected a JSON array or object".to_string(),
        )),
    }
}
