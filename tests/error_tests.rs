//! Error taxonomy tests

use estimate_insight::error::{InsightError, InsightResult};

#[test]
fn test_no_numeric_column_message() {
    let err = InsightError::NoNumericColumn("columns [\"a\", \"b\"]".to_string());
    assert!(err.to_string().contains("No numeric amount column"));
}

#[test]
fn test_invalid_input_message() {
    let err = InsightError::InvalidInput("estimate table has no rows".to_string());
    assert_eq!(
        err.to_string(),
        "Invalid input: estimate table has no rows"
    );
}

#[test]
fn test_import_message() {
    let err = InsightError::Import("failed to open Excel file".to_string());
    assert!(err.to_string().starts_with("Import error:"));
}

#[test]
fn test_io_error_converts() {
    fn read() -> InsightResult<String> {
        Ok(std::fs::read_to_string("definitely/not/here.txt")?)
    }
    let err = read().unwrap_err();
    assert!(matches!(err, InsightError::Io(_)));
    assert!(err.to_string().starts_with("IO error:"));
}

#[test]
fn test_export_and_narrative_messages() {
    assert!(InsightError::Export("bad".to_string())
        .to_string()
        .starts_with("Export error:"));
    assert!(InsightError::Narrative("bad".to_string())
        .to_string()
        .starts_with("Narrative error:"));
}
