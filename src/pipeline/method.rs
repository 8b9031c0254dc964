//! Method selection and the common report shape

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pipeline::error::AnalysisError;
use crate::pipeline::qualitative::{run_qualitative, QualitativeResult, ReductionSizes};
use crate::pipeline::quantitative::{run_quantitative, QuantitativeResult};
use crate::pipeline::reducer::SingleRulePolicy;
use crate::pipeline::table::DecisionTable;
use crate::pipeline::trace::Step;

/// Analysis method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Qualitative,
    Quantitative,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Qualitative, Method::Quantitative];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Qualitative => "qualitative",
            Self::Quantitative => "quantitative",
        }
    }

    /// One-line description for prompts
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Qualitative => "approximations + removal of inconsistent objects",
            Self::Quantitative => "decision rules + removal of weakest-rule objects",
        }
    }
}

impl FromStr for Method {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qualitative" => Ok(Self::Qualitative),
            "quantitative" => Ok(Self::Quantitative),
            _ => Err(AnalysisError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tunables shared by the CLI and the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisOptions {
    pub single_rule_policy: SingleRulePolicy,
}

/// Result payload of either method
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Qualitative(QualitativeResult),
    Quantitative(QuantitativeResult),
}

impl AnalysisResult {
    pub fn consistent_data(&self) -> &DecisionTable {
        match self {
            Self::Qualitative(r) => &r.consistent_data,
            Self::Quantitative(r) => &r.consistent_data,
        }
    }

    pub fn removed_objects(&self) -> &[String] {
        match self {
            Self::Qualitative(r) => &r.removed_objects,
            Self::Quantitative(r) => &r.removed_objects,
        }
    }

    pub fn summary(&self) -> &ReductionSizes {
        match self {
            Self::Qualitative(r) => &r.summary,
            Self::Quantitative(r) => &r.summary,
        }
    }
}

/// Steps plus final result of one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub steps: Vec<Step>,
    pub result: AnalysisResult,
}

/// Run the selected method over a table.
pub fn analyze(method: Method, table: &DecisionTable, options: &AnalysisOptions) -> AnalysisReport {
    tracing::info!(
        method = %method,
        rows = table.len(),
        attributes = table.condition_attributes().len(),
        "Starting analysis"
    );

    match method {
        Method::Qualitative => run_qualitative(table),
        Method::Quantitative => run_quantitative(table, options),
    }
}
