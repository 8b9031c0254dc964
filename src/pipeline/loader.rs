//! Decision table loader for delimited text files

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use polars::prelude::*;

use crate::pipeline::table::DecisionTable;

/// How to read a delimited decision table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field separator byte
    pub separator: u8,
    /// Text encoding label understood by `encoding_rs` (e.g. "latin1", "utf-8")
    pub encoding: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b';',
            encoding: "latin1".to_string(),
        }
    }
}

/// Decode raw bytes into UTF-8 text using the named encoding.
pub fn decode_text(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding_label.trim().as_bytes())
        .with_context(|| format!("Unsupported text encoding: '{}'", encoding_label))?;

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "Input contained byte sequences invalid for the encoding; replaced"
        );
    }

    Ok(text.into_owned())
}

/// Parse delimited text bytes into a DataFrame of string columns.
///
/// Cells keep their written form: no type inference, so `007` stays `007`
/// and a column that mixes numbers and text is accepted.
pub fn read_delimited(bytes: &[u8], options: &LoadOptions) -> Result<DataFrame> {
    let text = decode_text(bytes, &options.encoding)?;
    let separator = options.separator;

    // A zero-row schema scan types every column as String
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|parse| parse.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .context("Failed to parse delimited data")?;

    Ok(df)
}

/// Load a decision table from in-memory file contents.
pub fn load_decision_table_from_bytes(bytes: &[u8], options: &LoadOptions) -> Result<DecisionTable> {
    let df = read_delimited(bytes, options)?;
    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Parsed delimited data"
    );

    let table = DecisionTable::from_dataframe(&df).context("Invalid decision table")?;
    Ok(table)
}

/// Load a decision table from a delimited text file.
pub fn load_decision_table(path: &Path, options: &LoadOptions) -> Result<DecisionTable> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    load_decision_table_from_bytes(&bytes, options)
        .with_context(|| format!("Failed to load decision table: {}", path.display()))
}

/// Save a table as CSV (with the given separator) or Parquet, by extension.
pub fn save_decision_table(table: &DecisionTable, path: &Path, separator: u8) -> Result<()> {
    let mut df = table.to_dataframe()?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" | "txt" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .with_separator(separator)
                .finish(&mut df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(&mut df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, txt, parquet",
            extension
        ),
    }

    Ok(())
}
