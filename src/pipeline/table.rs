//! Decision table model
//!
//! A decision table is an ordered list of rows where column 0 identifies the
//! row, the last column holds the decision and everything in between is a
//! conditional attribute. Every comparison the analyses make goes through
//! [`normalize_value`] and [`ConditionKey`], so partitioning, approximation,
//! rule generation and rule matching all agree on what "the same" means.

use std::collections::{HashMap, HashSet};
use std::fmt;

use polars::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::pipeline::error::AnalysisError;

/// Normalize a raw cell for comparison: trim surrounding whitespace.
pub fn normalize_value(raw: &str) -> String {
    raw.trim().to_string()
}

/// Canonical condition of a row: `(attribute, normalized value)` pairs in
/// attribute order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionKey(Vec<(String, String)>);

impl ConditionKey {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Normalized values only, in attribute order
    pub fn values(&self) -> Vec<&str> {
        self.0.iter().map(|(_, v)| v.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(a, v)| format!("{}={}", a, v)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

// Serialized as a JSON object in attribute order: {"A": "x", "B": "y"}
impl Serialize for ConditionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (attribute, value) in &self.0 {
            map.serialize_entry(attribute, value)?;
        }
        map.end()
    }
}

/// One row of a decision table
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TableRow {
    /// Stable position of the row in the table as loaded
    pub index: usize,
    /// Raw cell text, one per column
    pub values: Vec<String>,
}

impl TableRow {
    /// Row reference used in every output: the stable index as a string
    pub fn reference(&self) -> String {
        self.index.to_string()
    }
}

/// Identifier column, conditional attributes, decision column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DecisionTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl DecisionTable {
    /// Build a table from column names and raw records.
    ///
    /// Rows are indexed by position. Fails when there are fewer than three
    /// columns or a record does not match the column count.
    pub fn new(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self, AnalysisError> {
        if columns.len() < 3 {
            return Err(AnalysisError::TooFewColumns {
                found: columns.len(),
            });
        }

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                if values.len() != columns.len() {
                    return Err(AnalysisError::RaggedRow {
                        row: index,
                        found: values.len(),
                        expected: columns.len(),
                    });
                }
                Ok(TableRow { index, values })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }

    /// Convert a loaded DataFrame, turning every cell into its string form.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, AnalysisError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if columns.len() < 3 {
            return Err(AnalysisError::TooFewColumns {
                found: columns.len(),
            });
        }

        let string_columns = df
            .get_columns()
            .iter()
            .map(column_to_strings)
            .collect::<Result<Vec<_>, _>>()?;

        let records = (0..df.height())
            .map(|row| string_columns.iter().map(|col| col[row].clone()).collect())
            .collect();

        Self::new(columns, records)
    }

    /// Convert back to a DataFrame with every column as a string column.
    pub fn to_dataframe(&self) -> Result<DataFrame, AnalysisError> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<&str> = self.rows.iter().map(|r| r.values[i].as_str()).collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn id_column(&self) -> &str {
        &self.columns[0]
    }

    pub fn condition_attributes(&self) -> &[String] {
        &self.columns[1..self.columns.len() - 1]
    }

    pub fn decision_attribute(&self) -> &str {
        &self.columns[self.columns.len() - 1]
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn references(&self) -> Vec<String> {
        self.rows.iter().map(TableRow::reference).collect()
    }

    /// Canonical condition key of a row
    pub fn condition_key(&self, row: &TableRow) -> ConditionKey {
        let last = self.columns.len() - 1;
        ConditionKey::new(
            (1..last)
                .map(|i| (self.columns[i].clone(), normalize_value(&row.values[i])))
                .collect(),
        )
    }

    /// Normalized decision of a row
    pub fn decision(&self, row: &TableRow) -> String {
        normalize_value(&row.values[self.columns.len() - 1])
    }

    /// Distinct normalized decision values in first-seen order
    pub fn decision_values(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            let decision = self.decision(row);
            if !seen.contains(&decision) {
                seen.push(decision);
            }
        }
        seen
    }

    /// Global count of each normalized decision value
    pub fn decision_frequencies(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for row in &self.rows {
            *counts.entry(self.decision(row)).or_insert(0) += 1;
        }
        counts
    }

    /// A copy of the table without the given row references, order preserved.
    pub fn without(&self, references: &[String]) -> DecisionTable {
        let removed: HashSet<&str> = references.iter().map(String::as_str).collect();
        let rows = self
            .rows
            .iter()
            .filter(|row| !removed.contains(row.reference().as_str()))
            .cloned()
            .collect();

        DecisionTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Convert a column to the string form of each cell; nulls become "".
fn column_to_strings(col: &Column) -> Result<Vec<String>, AnalysisError> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values.into_iter().map(Option::unwrap_or_default).collect())
}
