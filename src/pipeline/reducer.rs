//! Rule-based object removal (quantitative method)
//!
//! Rules sharing a condition compete. Within each condition group the rule
//! with the lowest weight names the decision whose rows are removed; equal
//! weights fall back to the decision that is rarest across the table, then
//! to the smaller decision value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pipeline::error::AnalysisError;
use crate::pipeline::rules::Rule;
use crate::pipeline::table::{ConditionKey, DecisionTable};

/// What to do with rows whose condition group holds a single rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleRulePolicy {
    /// Never remove rows of an uncontested condition
    #[default]
    Keep,
    /// Remove rows whose decision equals the lone rule's decision
    Remove,
}

impl FromStr for SingleRulePolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "remove" => Ok(Self::Remove),
            _ => Err(AnalysisError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SingleRulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Rules grouped by condition key, in rule order
pub type ConditionGroups<'a> = HashMap<&'a ConditionKey, Vec<&'a Rule>>;

/// Group rules sharing the same condition.
pub fn group_rules(rules: &[Rule]) -> ConditionGroups<'_> {
    let mut groups: ConditionGroups<'_> = HashMap::new();
    for rule in rules {
        groups.entry(&rule.condition).or_default().push(rule);
    }
    groups
}

/// Decision whose rows must go for a condition group, if any.
pub fn removable_decision<'a>(group: &[&'a Rule], policy: SingleRulePolicy) -> Option<&'a str> {
    match group {
        [] => None,
        [only] => match policy {
            SingleRulePolicy::Keep => None,
            SingleRulePolicy::Remove => Some(only.decision.as_str()),
        },
        _ => {
            let min_weight = group
                .iter()
                .map(|r| r.weight)
                .fold(f64::INFINITY, f64::min);

            group
                .iter()
                .filter(|r| r.weight == min_weight)
                .min_by(|a, b| {
                    a.decision_frequency
                        .cmp(&b.decision_frequency)
                        .then_with(|| a.decision.cmp(&b.decision))
                })
                .map(|r| r.decision.as_str())
        }
    }
}

/// Outcome of rule-based reduction
#[derive(Debug, Clone, PartialEq)]
pub struct RuleReduction {
    pub reduced: DecisionTable,
    pub removed: Vec<String>,
}

/// Rows whose decision is the weakest of their condition group, in table order.
pub fn find_objects_to_remove(
    table: &DecisionTable,
    rules: &[Rule],
    policy: SingleRulePolicy,
) -> Vec<String> {
    let groups = group_rules(rules);
    let mut targets: HashMap<&ConditionKey, Option<&str>> = HashMap::new();
    let mut to_remove = Vec::new();

    for row in table.rows() {
        let key = table.condition_key(row);
        let Some((group_key, group)) = groups.get_key_value(&key) else {
            tracing::warn!(row = row.index, condition = %key, "Row has no matching rule group");
            continue;
        };

        let target = *targets
            .entry(*group_key)
            .or_insert_with(|| removable_decision(group, policy));

        if target == Some(table.decision(row).as_str()) {
            to_remove.push(row.reference());
        }
    }

    to_remove
}

/// Remove the weakest-decision rows, keeping order and original references.
pub fn reduce_by_rules(
    table: &DecisionTable,
    rules: &[Rule],
    policy: SingleRulePolicy,
) -> RuleReduction {
    let removed = find_objects_to_remove(table, rules, policy);
    let reduced = table.without(&removed);

    tracing::info!(
        original = table.len(),
        reduced = reduced.len(),
        removed = removed.len(),
        policy = %policy,
        "Removed objects by rule weight"
    );

    RuleReduction { reduced, removed }
}
