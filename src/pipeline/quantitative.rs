//! Quantitative analysis: rule mining and rule-based reduction

use serde::Serialize;

use crate::pipeline::method::{AnalysisOptions, AnalysisReport, AnalysisResult};
use crate::pipeline::qualitative::ReductionSizes;
use crate::pipeline::reducer::reduce_by_rules;
use crate::pipeline::rules::{generate_rules, Rule};
use crate::pipeline::table::DecisionTable;
use crate::pipeline::trace::{StepPayload, Trace};

/// Final output of the quantitative method
#[derive(Debug, Clone, Serialize)]
pub struct QuantitativeResult {
    pub consistent_data: DecisionTable,
    pub removed_objects: Vec<String>,
    pub rules: Vec<Rule>,
    pub summary: ReductionSizes,
}

/// Run the quantitative method.
///
/// Steps: original data, generated rules, objects to remove, consistent dataset.
pub fn run_quantitative(table: &DecisionTable, options: &AnalysisOptions) -> AnalysisReport {
    let mut trace = Trace::new();
    trace.record(
        "Original data",
        StepPayload::Data {
            data: table.clone(),
        },
    );

    let rules = generate_rules(table);
    trace.record(
        "Generated rules",
        StepPayload::Rules {
            rules: rules.clone(),
        },
    );

    let reduction = reduce_by_rules(table, &rules, options.single_rule_policy);
    trace.record(
        "Objects to remove",
        StepPayload::Objects {
            objects: reduction.removed.clone(),
        },
    );
    trace.record(
        "Consistent dataset",
        StepPayload::Data {
            data: reduction.reduced.clone(),
        },
    );

    let summary = ReductionSizes {
        original_size: table.len(),
        consistent_size: reduction.reduced.len(),
        removed_count: reduction.removed.len(),
        rules_count: Some(rules.len()),
    };

    AnalysisReport {
        steps: trace.into_steps(),
        result: AnalysisResult::Quantitative(QuantitativeResult {
            consistent_data: reduction.reduced,
            removed_objects: reduction.removed,
            rules,
            summary,
        }),
    }
}
