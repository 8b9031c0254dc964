//! JSON export of analysis reports

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{AnalysisOptions, AnalysisReport, Method, SingleRulePolicy};

/// Metadata about the analysis run
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the analysis (RFC 3339)
    pub timestamp: String,
    /// Roughcut version
    pub roughcut_version: String,
    pub input_file: String,
    pub method: Method,
    pub single_rule_policy: SingleRulePolicy,
}

/// Complete export: metadata plus the full report
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub metadata: ReportMetadata,
    pub report: &'a AnalysisReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(
        input_file: &str,
        method: Method,
        options: &AnalysisOptions,
        report: &'a AnalysisReport,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                roughcut_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                method,
                single_rule_policy: options.single_rule_policy,
            },
            report,
        }
    }
}

/// Write the analysis report to a pretty-printed JSON file.
pub fn export_report(
    path: &Path,
    input_file: &str,
    method: Method,
    options: &AnalysisOptions,
    report: &AnalysisReport,
) -> Result<()> {
    let export = ReportExport::new(input_file, method, options, report);

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(())
}
