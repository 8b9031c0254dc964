//! Decision rule generation (quantitative method)
//!
//! Every observed condition key yields one rule per decision seen with it.
//! Rules are scored by support, confidence and weight:
//!
//! - `support = rows(condition ∧ decision) / rows(table)`
//! - `confidence = rows(condition ∧ decision) / rows(condition)`
//! - `weight = support × confidence`

use serde::Serialize;

use crate::pipeline::partition::partition;
use crate::pipeline::table::{ConditionKey, DecisionTable};

/// A condition → decision rule with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub condition: ConditionKey,
    pub decision: String,
    /// Rows matching both condition and decision
    pub support_count: usize,
    /// Rows matching the condition
    pub condition_count: usize,
    pub support: f64,
    pub confidence: f64,
    pub weight: f64,
    /// Occurrences of the decision across the whole table
    pub decision_frequency: usize,
}

/// Share of all rows backing a rule; 0.0 for an empty table.
pub fn rule_support(support_count: usize, total_rows: usize) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    support_count as f64 / total_rows as f64
}

/// Share of the condition's rows backing a rule; 0.0 for an empty group.
pub fn rule_confidence(support_count: usize, condition_count: usize) -> f64 {
    if condition_count == 0 {
        return 0.0;
    }
    support_count as f64 / condition_count as f64
}

/// Generate all rules present in the table.
///
/// Condition groups appear in first-seen order; within a group decisions
/// are ordered by descending count, then by value.
pub fn generate_rules(table: &DecisionTable) -> Vec<Rule> {
    let total_rows = table.len();
    let frequencies = table.decision_frequencies();
    let mut rules = Vec::new();

    for class in &partition(table) {
        let condition_count = class.len();

        for entry in class.decision_counts() {
            let support = rule_support(entry.count, total_rows);
            let confidence = rule_confidence(entry.count, condition_count);

            rules.push(Rule {
                condition: class.condition.clone(),
                decision_frequency: frequencies.get(&entry.decision).copied().unwrap_or(0),
                decision: entry.decision,
                support_count: entry.count,
                condition_count,
                support,
                confidence,
                weight: support * confidence,
            });
        }
    }

    tracing::info!(rules = rules.len(), rows = total_rows, "Generated decision rules");
    rules
}
