//! Lower and upper approximations of decision classes

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::pipeline::partition::Partition;
use crate::pipeline::table::{normalize_value, DecisionTable};

/// Rough-set approximation of the rows carrying one decision value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Approximation {
    pub decision: String,
    /// Rows whose whole class carries the decision
    pub lower: Vec<String>,
    /// Rows whose class contains the decision at least once
    pub upper: Vec<String>,
    /// `|lower| / |upper|`, or 0.0 when upper is empty
    pub accuracy: f64,
}

impl Approximation {
    /// Rows in the upper but not the lower approximation
    pub fn boundary(&self) -> Vec<String> {
        self.upper
            .iter()
            .filter(|r| !self.lower.contains(r))
            .cloned()
            .collect()
    }
}

/// Approximations serialized as a JSON object keyed by decision value,
/// in first-seen order: `{"P": {...}, "Q": {...}}`.
#[derive(Debug, Clone, Copy)]
pub struct ApproximationsByDecision<'a>(pub &'a [Approximation]);

impl Serialize for ApproximationsByDecision<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for approximation in self.0 {
            map.serialize_entry(&approximation.decision, approximation)?;
        }
        map.end()
    }
}

/// `serialize_with` adapter for fields holding approximations
pub fn serialize_by_decision<S: Serializer>(
    approximations: &[Approximation],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    ApproximationsByDecision(approximations).serialize(serializer)
}

/// Accuracy of an approximation; an empty upper approximation scores 0.0.
pub fn accuracy(lower: &[String], upper: &[String]) -> f64 {
    if upper.is_empty() {
        return 0.0;
    }
    lower.len() as f64 / upper.len() as f64
}

/// Compute the approximation of one decision value over a partition.
pub fn approximate(partition: &Partition, decision: &str) -> Approximation {
    let decision = normalize_value(decision);
    let mut lower = Vec::new();
    let mut upper = Vec::new();

    for class in partition {
        tracing::debug!(
            class = %class.condition,
            decisions = ?class.decisions,
            "Class decisions"
        );

        if class.decisions.iter().all(|d| *d == decision) {
            lower.extend(class.members.iter().cloned());
        }
        if class.decisions.iter().any(|d| *d == decision) {
            upper.extend(class.members.iter().cloned());
        }
    }

    let accuracy = accuracy(&lower, &upper);
    tracing::debug!(
        decision = %decision,
        lower = lower.len(),
        upper = upper.len(),
        accuracy,
        "Computed approximation"
    );

    Approximation {
        decision,
        lower,
        upper,
        accuracy,
    }
}

/// Approximations for every distinct decision value, in first-seen order.
pub fn approximate_all(table: &DecisionTable, partition: &Partition) -> Vec<Approximation> {
    table
        .decision_values()
        .iter()
        .map(|decision| approximate(partition, decision))
        .collect()
}
