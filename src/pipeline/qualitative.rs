//! Qualitative analysis: approximations and consistency reduction

use serde::Serialize;

use crate::pipeline::approximation::{approximate_all, serialize_by_decision, Approximation};
use crate::pipeline::consistency::remove_inconsistent;
use crate::pipeline::method::{AnalysisReport, AnalysisResult};
use crate::pipeline::partition::partition;
use crate::pipeline::table::DecisionTable;
use crate::pipeline::trace::{StepPayload, Trace};

/// Sizes before and after a reduction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionSizes {
    pub original_size: usize,
    pub consistent_size: usize,
    pub removed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_count: Option<usize>,
}

/// Final output of the qualitative method
#[derive(Debug, Clone, Serialize)]
pub struct QualitativeResult {
    pub consistent_data: DecisionTable,
    pub removed_objects: Vec<String>,
    #[serde(serialize_with = "serialize_by_decision")]
    pub approximations: Vec<Approximation>,
    pub summary: ReductionSizes,
}

/// Run the qualitative method.
///
/// Steps: original data, classes with frequencies, approximations,
/// inconsistent objects, consistent dataset.
pub fn run_qualitative(table: &DecisionTable) -> AnalysisReport {
    let mut trace = Trace::new();
    trace.record(
        "Original data",
        StepPayload::Data {
            data: table.clone(),
        },
    );

    let classes = partition(table);
    trace.record(
        "Abstraction classes with frequencies",
        StepPayload::Classes {
            classes: classes.snapshot(),
        },
    );

    let approximations = approximate_all(table, &classes);
    trace.record(
        "Approximations",
        StepPayload::Approximations {
            approximations: approximations.clone(),
        },
    );

    let reduction = remove_inconsistent(table, &classes);
    trace.record(
        "Inconsistent objects",
        StepPayload::Objects {
            objects: reduction.removed.clone(),
        },
    );
    trace.record(
        "Consistent dataset",
        StepPayload::Data {
            data: reduction.consistent.clone(),
        },
    );

    let summary = ReductionSizes {
        original_size: table.len(),
        consistent_size: reduction.consistent.len(),
        removed_count: reduction.removed.len(),
        rules_count: None,
    };

    AnalysisReport {
        steps: trace.into_steps(),
        result: AnalysisResult::Qualitative(QualitativeResult {
            consistent_data: reduction.consistent,
            removed_objects: reduction.removed,
            approximations,
            summary,
        }),
    }
}
