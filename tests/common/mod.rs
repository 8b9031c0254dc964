//! Shared test utilities and fixture generators
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roughcut::pipeline::{partition, DecisionTable};
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a table from string slices
pub fn table(columns: &[&str], rows: &[&[&str]]) -> DecisionTable {
    DecisionTable::new(
        columns.iter().map(|s| s.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

/// Three indiscernible rows, two decided P and one Q
///
/// References are "0", "1", "2"; the Q row is "2".
pub fn create_example_table() -> DecisionTable {
    table(
        &["id", "A", "B", "dec"],
        &[
            &["1", "x", "y", "P"],
            &["2", "x", "y", "P"],
            &["3", "x", "y", "Q"],
        ],
    )
}

/// Small flu table with known classes
///
/// - (yes, high): rows 0, 1, 2 → yes, yes, no
/// - (no, normal): rows 3, 4 → no, no
/// - (no, high): rows 5, 6 → yes, no (tie)
/// - (yes, normal): row 7 → no
pub fn create_flu_table() -> DecisionTable {
    table(
        &["Patient", "Headache", "Temperature", "Flu"],
        &[
            &["p1", "yes", "high", "yes"],
            &["p2", "yes", "high", "yes"],
            &["p3", "yes", "high", "no"],
            &["p4", "no", "normal", "no"],
            &["p5", "no", "normal", "no"],
            &["p6", "no", "high", "yes"],
            &["p7", "no", "high", "no"],
            &["p8", "yes", "normal", "no"],
        ],
    )
}

/// Flu table as semicolon-delimited text
pub fn flu_csv() -> String {
    let mut text = String::from("Patient;Headache;Temperature;Flu\n");
    for row in create_flu_table().rows() {
        text.push_str(&row.values.join(";"));
        text.push('\n');
    }
    text
}

/// Random table with a small value alphabet so classes collide often
pub fn create_random_table(
    seed: u64,
    rows: usize,
    attributes: usize,
    values_per_attribute: usize,
    decisions: usize,
) -> DecisionTable {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns = vec!["id".to_string()];
    columns.extend((0..attributes).map(|i| format!("a{}", i)));
    columns.push("decision".to_string());

    let records = (0..rows)
        .map(|r| {
            let mut record = vec![format!("obj{}", r)];
            record.extend(
                (0..attributes).map(|_| format!("v{}", rng.gen_range(0..values_per_attribute))),
            );
            record.push(format!("d{}", rng.gen_range(0..decisions)));
            record
        })
        .collect();

    DecisionTable::new(columns, records).unwrap()
}

/// Write bytes to a temporary file
pub fn create_temp_file(contents: &[u8], name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// Assert that every class of the table carries a single decision
pub fn assert_decision_uniform(table: &DecisionTable) {
    for class in &partition(table) {
        assert!(
            class.is_consistent(),
            "Class {} still has decisions {:?}",
            class.condition,
            class.decisions
        );
    }
}

/// Assert removed references are a subset of the original references
pub fn assert_subset(removed: &[String], original: &DecisionTable) {
    let references: HashSet<String> = original.references().into_iter().collect();
    for r in removed {
        assert!(references.contains(r), "Removed reference {} not in original", r);
    }
}
