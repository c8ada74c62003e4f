//! Local file formats for bulk import and export.
//!
//! Rows are flat JSON objects. JSON files hold an array of objects; CSV files
//! have a header row and one record per row.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::backend::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Json,
    Csv,
}

impl TransferFormat {
    pub const ALL: [TransferFormat; 2] = [TransferFormat::Json, TransferFormat::Csv];

    pub fn label(self) -> &'static str {
        match self {
            TransferFormat::Json => "JSON",
            TransferFormat::Csv => "CSV",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("expected a JSON array of objects")]
    NotAnArray,

    #[error("file contains no rows")]
    Empty,
}

/// Parse file content into rows
pub fn parse_rows(content: &str, format: TransferFormat) -> Result<Vec<Row>, TransferError> {
    let rows = match format {
        TransferFormat::Json => parse_json(content)?,
        TransferFormat::Csv => parse_csv(content)?,
    };
    if rows.is_empty() {
        return Err(TransferError::Empty);
    }
    Ok(rows)
}

fn parse_json(content: &str) -> Result<Vec<Row>, TransferError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(TransferError::NotAnArray);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            _ => Err(TransferError::NotAnArray),
        })
        .collect()
}

fn parse_csv(content: &str) -> Result<Vec<Row>, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Render rows in the requested format
pub fn render_rows(rows: &[Row], format: TransferFormat) -> Result<String, TransferError> {
    match format {
        TransferFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        TransferFormat::Csv => render_csv(rows),
    }
}

fn render_csv(rows: &[Row]) -> Result<String, TransferError> {
    // Header is the sorted union of keys so sparse rows still line up
    let headers: BTreeSet<&str> = rows.iter().flat_map(|row| row.keys().map(String::as_str)).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers.iter())?;
    for row in rows {
        let cells: Vec<String> = headers.iter().map(|header| cell_text(row.get(*header))).collect();
        writer.write_record(&cells)?;
    }
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read and parse a local file
pub async fn read_rows(path: &Path, format: TransferFormat) -> Result<Vec<Row>, TransferError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| TransferError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(&content, format)
}

/// Render rows and write them to a local file, creating parent directories
pub async fn write_rows(path: &Path, rows: &[Row], format: TransferFormat) -> Result<(), TransferError> {
    let content = render_rows(rows, format)?;
    let write_error = |source| TransferError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
    }
    tokio::fs::write(path, content).await.map_err(write_error)
}
