//! Tests for loading and saving decision tables

use roughcut::pipeline::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_semicolon_file() {
    let (_temp_dir, path) = create_temp_file(flu_csv().as_bytes(), "flu.csv");

    let table = load_decision_table(&path, &LoadOptions::default()).unwrap();

    assert_eq!(table.len(), 8);
    assert_eq!(table.id_column(), "Patient");
    assert_eq!(
        table.condition_attributes(),
        &["Headache".to_string(), "Temperature".to_string()]
    );
    assert_eq!(table.decision_attribute(), "Flu");
    assert_eq!(table, create_flu_table());
}

#[test]
fn test_load_latin1_header_and_values() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"id;Temp\xe9rature;D\xe9cision\n");
    bytes.extend_from_slice(b"1;\xe9lev\xe9e;oui\n");
    bytes.extend_from_slice(b"2;normale;non\n");
    let (_temp_dir, path) = create_temp_file(&bytes, "latin1.csv");

    let table = load_decision_table(&path, &LoadOptions::default()).unwrap();

    assert_eq!(table.condition_attributes(), &["Température".to_string()]);
    assert_eq!(table.decision_attribute(), "Décision");
    assert_eq!(table.rows()[0].values[1], "élevée");
}

#[test]
fn test_load_utf8_with_comma_separator() {
    let data = "id,colour,ok\n1,żółty,yes\n2,zielony,no\n";
    let options = LoadOptions {
        separator: b',',
        encoding: "utf-8".to_string(),
    };

    let table = load_decision_table_from_bytes(data.as_bytes(), &options).unwrap();
    assert_eq!(table.rows()[0].values[1], "żółty");
}

#[test]
fn test_cells_keep_their_written_form() {
    let data = b"id;a;score;dec\n007;x;2.50;P\n010;y;1e3;Q\n";
    let table = load_decision_table_from_bytes(data, &LoadOptions::default()).unwrap();

    assert_eq!(table.rows()[0].values[0], "007");
    assert_eq!(table.rows()[0].values, vec!["007", "x", "2.50", "P"]);
    assert_eq!(table.rows()[1].values, vec!["010", "y", "1e3", "Q"]);
}

#[test]
fn test_column_turning_to_text_late_is_accepted() {
    let mut text = String::from("id;A;dec\n");
    for i in 0..150 {
        let a = if i == 120 {
            "high".to_string()
        } else {
            (i % 3).to_string()
        };
        text.push_str(&format!("{};{};{}\n", i, a, if i % 2 == 0 { "P" } else { "Q" }));
    }

    let table = load_decision_table_from_bytes(text.as_bytes(), &LoadOptions::default()).unwrap();

    assert_eq!(table.len(), 150);
    assert_eq!(table.rows()[120].values[1], "high");
    assert_eq!(table.rows()[121].values[1], "1");
    assert_eq!(partition(&table).len(), 4);
}

#[test]
fn test_saved_file_keeps_identifiers() {
    let data = b"id;a;dec\n007;x;P\n008;x;Q\n009;x;P\n";
    let table = load_decision_table_from_bytes(data, &LoadOptions::default()).unwrap();
    let report = run_qualitative(&table);

    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("reduced.csv");
    save_decision_table(report.result.consistent_data(), &path, b';').unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("007;x;P"), "written: {}", written);
    assert!(written.contains("009;x;P"), "written: {}", written);
    assert!(!written.contains("008"));
}

#[test]
fn test_missing_cells_become_empty() {
    let data = b"id;a;dec\n1;;P\n2;x;Q\n";
    let table = load_decision_table_from_bytes(data, &LoadOptions::default()).unwrap();

    assert_eq!(table.rows()[0].values[1], "");
}

#[test]
fn test_load_missing_file() {
    let result = load_decision_table(
        std::path::Path::new("/definitely/not/here.csv"),
        &LoadOptions::default(),
    );
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read file"));
}

#[test]
fn test_load_rejects_table_without_conditions() {
    let data = b"id;dec\n1;P\n2;Q\n";
    let err = load_decision_table_from_bytes(data, &LoadOptions::default()).unwrap_err();

    assert!(format!("{:#}", err).contains("at least one conditional attribute"));
}

#[test]
fn test_save_and_reload_csv() {
    let table = create_flu_table();
    let reduced = table.without(&["2".to_string(), "5".to_string()]);

    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("reduced.csv");
    save_decision_table(&reduced, &path, b';').unwrap();

    let reloaded = load_decision_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(reloaded.len(), 6);
    assert_eq!(reloaded.rows()[2].values[0], "p4");
    assert_eq!(reloaded.columns(), table.columns());
}

#[test]
fn test_save_parquet() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("reduced.parquet");

    save_decision_table(&create_example_table(), &path, b';').unwrap();
    assert!(path.exists());
}

#[test]
fn test_save_unsupported_extension() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("reduced.xlsx");

    let result = save_decision_table(&create_example_table(), &path, b';');
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unsupported output format"));
}
