//! Indiscernibility classes
//!
//! Rows that share an identical condition key cannot be told apart by the
//! conditional attributes; each such group is one class.

use std::collections::HashMap;

use serde::Serialize;

use crate::pipeline::table::{ConditionKey, DecisionTable};

/// How often a decision value occurs within a group of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionCount {
    pub decision: String,
    pub count: usize,
}

/// Rows sharing one condition key
#[derive(Debug, Clone, PartialEq)]
pub struct IndiscernibilityClass {
    pub condition: ConditionKey,
    /// Row references in table order
    pub members: Vec<String>,
    /// Normalized decision of each member, aligned with `members`
    pub decisions: Vec<String>,
}

impl IndiscernibilityClass {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Decision frequencies, most frequent first; equal counts are ordered
    /// by decision value.
    pub fn decision_counts(&self) -> Vec<DecisionCount> {
        count_decisions(&self.decisions)
    }

    /// True when every member carries the same decision
    pub fn is_consistent(&self) -> bool {
        self.decisions.windows(2).all(|w| w[0] == w[1])
    }

    /// Most frequent decision, ties resolved by decision value.
    pub fn majority_decision(&self) -> Option<String> {
        self.decision_counts().into_iter().next().map(|c| c.decision)
    }

    /// Iterate `(reference, decision)` pairs
    pub fn iter_members(&self) -> impl Iterator<Item = (&str, &str)> {
        self.members
            .iter()
            .zip(self.decisions.iter())
            .map(|(m, d)| (m.as_str(), d.as_str()))
    }
}

/// Serializable view of a class for step traces
#[derive(Debug, Clone, Serialize)]
pub struct ClassSnapshot {
    pub condition: ConditionKey,
    pub members: Vec<String>,
    pub frequencies: Vec<DecisionCount>,
}

impl From<&IndiscernibilityClass> for ClassSnapshot {
    fn from(class: &IndiscernibilityClass) -> Self {
        Self {
            condition: class.condition.clone(),
            members: class.members.clone(),
            frequencies: class.decision_counts(),
        }
    }
}

/// The indiscernibility classes of a table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    classes: Vec<IndiscernibilityClass>,
}

impl Partition {
    pub fn classes(&self) -> &[IndiscernibilityClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndiscernibilityClass> {
        self.classes.iter()
    }

    pub fn snapshot(&self) -> Vec<ClassSnapshot> {
        self.classes.iter().map(ClassSnapshot::from).collect()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a IndiscernibilityClass;
    type IntoIter = std::slice::Iter<'a, IndiscernibilityClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Group rows into indiscernibility classes by their condition key.
pub fn partition(table: &DecisionTable) -> Partition {
    let mut positions: HashMap<ConditionKey, usize> = HashMap::new();
    let mut classes: Vec<IndiscernibilityClass> = Vec::new();

    for row in table.rows() {
        let key = table.condition_key(row);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            classes.push(IndiscernibilityClass {
                condition: key,
                members: Vec::new(),
                decisions: Vec::new(),
            });
            classes.len() - 1
        });

        let class = &mut classes[position];
        class.members.push(row.reference());
        class.decisions.push(table.decision(row));
    }

    tracing::debug!(
        rows = table.len(),
        classes = classes.len(),
        "Partitioned table into indiscernibility classes"
    );

    Partition { classes }
}

/// Count decisions, most frequent first, ties ordered by decision value.
pub(crate) fn count_decisions(decisions: &[String]) -> Vec<DecisionCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for decision in decisions {
        *counts.entry(decision.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<DecisionCount> = counts
        .into_iter()
        .map(|(decision, count)| DecisionCount {
            decision: decision.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.decision.cmp(&b.decision)));
    counts
}
