//! Removal of inconsistent objects (qualitative method)
//!
//! A class is inconsistent when its members disagree on the decision. The
//! majority decision of such a class is kept and every other member is
//! flagged. Equal counts are settled by the smaller decision value so the
//! outcome does not depend on row order.

use crate::pipeline::partition::Partition;
use crate::pipeline::table::DecisionTable;

/// Outcome of removing inconsistent rows
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReduction {
    pub consistent: DecisionTable,
    pub removed: Vec<String>,
}

/// Find rows whose decision differs from their class majority.
///
/// References are returned in class order, then member order.
pub fn find_inconsistent_objects(partition: &Partition) -> Vec<String> {
    let mut inconsistent = Vec::new();

    for class in partition {
        if class.is_consistent() {
            continue;
        }
        let Some(majority) = class.majority_decision() else {
            continue;
        };

        tracing::debug!(
            class = %class.condition,
            majority = %majority,
            "Inconsistent class"
        );

        inconsistent.extend(
            class
                .iter_members()
                .filter(|(_, decision)| *decision != majority)
                .map(|(reference, _)| reference.to_string()),
        );
    }

    inconsistent
}

/// Drop every inconsistent row, keeping order and original references.
pub fn remove_inconsistent(table: &DecisionTable, partition: &Partition) -> ConsistencyReduction {
    let removed = find_inconsistent_objects(partition);
    let consistent = table.without(&removed);

    tracing::info!(
        original = table.len(),
        consistent = consistent.len(),
        removed = removed.len(),
        "Removed inconsistent objects"
    );

    ConsistencyReduction {
        consistent,
        removed,
    }
}
