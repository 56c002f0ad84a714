//! Tests for directory-level validation of YAML records.

use std::fs;

use jingyan::Validator;
use tempfile::TempDir;

const VALID_RECORD: &str = r#"
id: performance-cache-warmup
title: Cache warm-up
category: performance
subcategory: caching
tags: [cache, latency]
difficulty: advanced
tech_stack: [Redis]
description: Cache warm-up reduces p99 latency across rollouts significantly.
solution:
  approach: Warm hot keys before traffic shift
  code_examples:
    - language: lua
      code: redis.call('GET', KEYS[1])
metadata:
  author: dev
  created_at: "2024-03-01"
  quality_score: 8
"#;

#[test]
fn validate_file_reports_missing_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("incomplete.yaml");
    fs::write(&path, "title: Only a title\n").unwrap();

    let report = Validator::new().validate_file(&path);
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("id")));
    assert!(report.errors.iter().any(|e| e.contains("solution")));
}

#[test]
fn validate_file_accepts_complete_record() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("performance");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cache-warmup.yaml");
    fs::write(&path, VALID_RECORD).unwrap();

    let report = Validator::new().validate_file(&path);
    assert!(report.valid, "errors: {:?}", report.errors);
}

#[test]
fn misplaced_file_draws_a_placement_warning() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("testing");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cache-warmup.yaml");
    fs::write(&path, VALID_RECORD).unwrap();

    let report = Validator::new().validate_file(&path);
    assert!(report.valid);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("performance directory"))
    );
}

#[test]
fn non_string_enum_values_are_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("numeric.yaml");
    let record = VALID_RECORD
        .replace("category: performance", "category: 42")
        .replace("difficulty: advanced", "difficulty: 3");
    fs::write(&path, record).unwrap();

    let report = Validator::new().validate_file(&path);
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("invalid category")));
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("invalid difficulty"))
    );
}

#[test]
fn unparseable_file_is_invalid_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "title: [unclosed\n").unwrap();

    let report = Validator::new().validate_file(&path);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("parse"));
}

#[test]
fn validate_dir_counts_valid_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("performance");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("good.yaml"), VALID_RECORD).unwrap();
    fs::write(dir.join("bad.yaml"), "title: Only a title\n").unwrap();
    fs::write(dir.join("notes.md"), "# Not validated\n").unwrap();

    let report = Validator::new().validate_dir(temp_dir.path()).unwrap();
    assert_eq!(report.total_files, 2);
    assert_eq!(report.valid_files, 1);
    assert_eq!(report.files.len(), 2);
}

#[test]
fn validate_dir_on_missing_path_errors() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");
    assert!(Validator::new().validate_dir(&missing).is_err());
}
