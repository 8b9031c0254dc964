//! Error types for decision table analysis

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the analysis core when its input is malformed.
///
/// Empty approximations and empty condition groups are not errors; they
/// resolve to `0.0` scores and empty lists.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The table lacks an identifier, a conditional attribute or a decision column.
    #[error(
        "Decision table needs an identifier column, at least one conditional attribute \
         and a decision column; found {found} column(s)"
    )]
    TooFewColumns { found: usize },

    /// A row does not have one value per column.
    #[error("Row {row} has {found} value(s) but the table has {expected} column(s)")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The method selector names neither analysis.
    #[error("Invalid method selected: '{0}'. Expected 'qualitative' or 'quantitative'")]
    UnknownMethod(String),

    /// The single-rule policy name is not recognised.
    #[error("Invalid single-rule policy: '{0}'. Expected 'keep' or 'remove'")]
    UnknownPolicy(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
