//! Integration tests for the batch pipeline.
//!
//! These tests drive `Pipeline::run` end to end against a scripted
//! collaborator and a temporary input directory:
//! 1. Enumerate and extract every spec sheet
//! 2. Render the table and best price
//! 3. Persist the records
//! 4. Request and print the verdict

use std::fs;
use std::path::Path;

use spec_compare::{
    testing::MockInference, Config, ExtractionFailure, Pipeline, PipelineError, SpecRecord,
};
use tempfile::TempDir;

const VERDICT: &str = r#"{
    "best_value_product": "Laptop C",
    "reason": "Lowest price for the same chip",
    "comparison_summary": [
        {"product_name": "Laptop A", "strengths": ["battery life"], "weaknesses": ["price"]},
        {"product_name": "Laptop B", "strengths": ["screen", "ports"], "weaknesses": ["weight"]},
        {"product_name": "Laptop C", "strengths": ["price"], "weaknesses": ["storage"]}
    ]
}"#;

/// Helper to create an input directory with empty placeholder PDFs.
fn input_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in files {
        fs::write(dir.path().join(name), b"%PDF-1.4").unwrap();
    }
    dir
}

fn config(input: &Path, output: &Path) -> Config {
    Config::new("test-key")
        .with_input_dir(input)
        .with_output_path(output)
}

fn three_laptops() -> MockInference {
    MockInference::new()
        .with_document_response(
            "a.pdf",
            "```json\n{\"product_name\": \"Laptop A\", \"processor\": \"M3\", \"ram\": \"16GB\", \"storage\": \"512GB\", \"price\": 999, \"battery\": \"18h\", \"weight\": \"1.2kg\"}\n```",
        )
        .with_document_response(
            "b.pdf",
            r#"{"product_name": "Laptop B", "processor": "i7", "ram": "32GB", "storage": "1TB", "price": 1299, "battery": "10h", "weight": "1.8kg"}"#,
        )
        .with_document_response(
            "c.pdf",
            r#"{"product_name": "Laptop C", "processor": "M3", "ram": "8GB", "storage": "256GB", "price": 899, "battery": "15h", "weight": "1.3kg"}"#,
        )
        .with_analysis_response(VERDICT)
}

#[tokio::test]
async fn test_three_products_scenario() {
    let input = input_dir(&["a.pdf", "b.pdf", "c.pdf"]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = three_laptops();

    let mut report: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config(input.path(), &output), mock.clone())
        .run(&mut report)
        .await
        .unwrap();
    let report = String::from_utf8(report).unwrap();

    // Cheapest
    let cheapest = outcome.cheapest.unwrap();
    assert_eq!(cheapest.product_name, "Laptop C");
    assert_eq!(cheapest.price.as_u64(), Some(899));
    assert!(report.contains("Best Price: Laptop C at $899"));

    // Persisted file holds the three records in order
    let saved: Vec<SpecRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let names: Vec<&str> = saved.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, ["Laptop A", "Laptop B", "Laptop C"]);
    assert_eq!(saved, outcome.records);
    assert_eq!(outcome.saved_to.as_deref(), Some(output.as_path()));

    // Table has three product columns and six attribute rows
    let header = report
        .lines()
        .find(|l| l.starts_with("Specification"))
        .unwrap();
    assert_eq!(header.split_whitespace().filter(|w| *w != "Laptop").count(), 4);
    for label in ["Processor", "Ram", "Storage", "Battery", "Weight", "Price"] {
        assert_eq!(
            report.lines().filter(|l| l.starts_with(label)).count(),
            1,
            "row {label}"
        );
    }

    // Verdict
    let verdict = outcome.verdict.unwrap();
    assert_eq!(verdict.best_value_product, "Laptop C");
    assert!(report.contains("Best Value Product: Laptop C"));
    assert!(report.contains("Strengths: screen, ports"));

    // One upload and one delete per sheet, one analysis call
    assert_eq!(mock.upload_count(), 3);
    assert_eq!(mock.delete_count(), 3);
    assert_eq!(mock.analysis_count(), 1);
}

#[tokio::test]
async fn test_failed_sheets_are_skipped() {
    let input = input_dir(&["a.pdf", "broken.pdf", "c.pdf", "offline.pdf"]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = three_laptops()
        .with_document_response("broken.pdf", "I could not find a price list.")
        .with_upload_failure("offline.pdf");

    let mut report: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config(input.path(), &output), mock.clone())
        .run(&mut report)
        .await
        .unwrap();
    let report = String::from_utf8(report).unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped.len(), 2);
    assert!(matches!(outcome.skipped[0].reason, ExtractionFailure::Parse(_)));
    assert!(matches!(outcome.skipped[1].reason, ExtractionFailure::Upload(_)));
    assert_eq!(
        report.lines().filter(|l| l.starts_with("Error: ")).count(),
        2
    );
    // failed uploads have nothing to delete
    assert_eq!(mock.delete_count(), 3);
    assert!(output.exists());
}

#[tokio::test]
async fn test_no_records_means_no_report_no_file_no_analysis() {
    let input = input_dir(&["a.pdf", "b.pdf"]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = MockInference::new()
        .with_document_error("a.pdf", "quota exceeded")
        .with_document_response("b.pdf", "not json")
        .with_analysis_response(VERDICT);

    let mut report: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config(input.path(), &output), mock.clone())
        .run(&mut report)
        .await
        .unwrap();
    let report = String::from_utf8(report).unwrap();

    assert!(outcome.records.is_empty());
    assert!(outcome.cheapest.is_none());
    assert!(outcome.verdict.is_none());
    assert!(outcome.saved_to.is_none());
    assert!(!output.exists());
    assert_eq!(mock.analysis_count(), 0);
    assert!(!report.contains("PRICE COMPARISON TABLE"));
    assert!(report.contains("No spec sheets could be analyzed."));
}

#[tokio::test]
async fn test_empty_directory() {
    let input = input_dir(&[]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = MockInference::new();

    let mut report: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config(input.path(), &output), mock.clone())
        .run(&mut report)
        .await
        .unwrap();

    assert!(outcome.records.is_empty());
    assert!(mock.calls().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_analysis_failure_keeps_report_and_file() {
    let input = input_dir(&["a.pdf"]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = three_laptops().with_analysis_response("```json\n{\"oops\": true\n```");

    let mut report: Vec<u8> = Vec::new();
    let outcome = Pipeline::new(config(input.path(), &output), mock)
        .run(&mut report)
        .await
        .unwrap();
    let report = String::from_utf8(report).unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.verdict.is_none());
    assert!(output.exists());
    assert!(report.contains("Best Price: Laptop A at $999"));
    assert!(report.contains("AI comparison failed"));
    assert!(!report.contains("AI Verdict"));
}

#[tokio::test]
async fn test_output_is_overwritten() {
    let input = input_dir(&["c.pdf"]);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    fs::write(&output, "[{\"product_name\": \"Stale\"}]").unwrap();

    Pipeline::new(config(input.path(), &output), three_laptops())
        .run(&mut std::io::sink())
        .await
        .unwrap();

    let saved: Vec<SpecRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].product_name, "Laptop C");
}

#[tokio::test]
async fn test_subdirectories_are_ignored() {
    let input = input_dir(&["a.pdf"]);
    fs::create_dir(input.path().join("archive")).unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("results.json");
    let mock = three_laptops();

    let outcome = Pipeline::new(config(input.path(), &output), mock.clone())
        .run(&mut std::io::sink())
        .await
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(mock.upload_count(), 1);
}

#[tokio::test]
async fn test_missing_input_directory_is_fatal() {
    let out_dir = TempDir::new().unwrap();
    let missing = out_dir.path().join("nope");
    let output = out_dir.path().join("results.json");

    let err = Pipeline::new(config(&missing, &output), MockInference::new())
        .run(&mut std::io::sink())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::ReadInputDir { .. }));
}
