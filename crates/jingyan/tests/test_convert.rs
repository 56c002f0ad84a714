//! Tests for YAML -> Markdown conversion, including the round-trip back
//! through the loader.

use std::fs;

use jingyan::{Difficulty, ExperienceLoader, RecordFormat, convert_dir, convert_file};
use tempfile::TempDir;

const YAML_RECORD: &str = r#"
id: performance-cache-warmup
title: Cache warm-up
category: performance
subcategory: caching
tags: [cache, latency]
difficulty: expert
tech_stack: [Redis, Lua]
description: Warm hot keys before shifting traffic to a fresh deployment.
solution:
  approach: Preload the working set
  implementation: Scripted warm-up during deploy
  code_examples:
    - language: lua
      code: redis.call('GET', KEYS[1])
      explanation: Touch the hottest keys first
metadata:
  author: dev
  created_at: "2024-03-01"
  source_project: shop-api
"#;

#[test]
fn convert_file_writes_markdown_next_to_source() {
    let temp_dir = TempDir::new().unwrap();
    let yaml_path = temp_dir.path().join("cache-warmup.yaml");
    fs::write(&yaml_path, YAML_RECORD).unwrap();

    let out_path = convert_file(&yaml_path, None).unwrap();
    assert_eq!(out_path, temp_dir.path().join("cache-warmup.md"));

    let markdown = fs::read_to_string(&out_path).unwrap();
    assert!(markdown.starts_with("# Cache warm-up"));
    assert!(markdown.contains("> **难度等级**: ⭐⭐⭐⭐⭐"));
    assert!(markdown.contains("### 代码示例"));
    assert!(markdown.contains("**说明**: Touch the hottest keys first"));
}

#[test]
fn convert_file_honors_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();
    let yaml_path = temp_dir.path().join("cache-warmup.yaml");
    fs::write(&yaml_path, YAML_RECORD).unwrap();

    let out_path = convert_file(&yaml_path, Some(&out_dir)).unwrap();
    assert_eq!(out_path, out_dir.join("cache-warmup.md"));
}

#[test]
fn converted_markdown_loads_back_with_same_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let yaml_path = temp_dir.path().join("cache-warmup.yaml");
    fs::write(&yaml_path, YAML_RECORD).unwrap();

    let out_path = convert_file(&yaml_path, None).unwrap();
    let record = ExperienceLoader::new().load_file(&out_path).unwrap();

    assert_eq!(record.format, RecordFormat::Markdown);
    assert_eq!(record.title, "Cache warm-up");
    assert_eq!(record.difficulty, Difficulty::Expert);
    assert_eq!(record.tech_stack, vec!["Redis", "Lua"]);
    assert_eq!(
        record.description,
        "Warm hot keys before shifting traffic to a fresh deployment."
    );
    assert_eq!(record.source.as_deref(), Some("shop-api"));
}

#[test]
fn convert_dir_reports_success_counts() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("performance");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("one.yaml"), YAML_RECORD).unwrap();
    fs::write(dir.join("two.yaml"), YAML_RECORD).unwrap();
    fs::write(dir.join("broken.yaml"), "title: [unclosed\n").unwrap();

    let summary = convert_dir(temp_dir.path()).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.converted, 2);
    assert!(dir.join("one.md").exists());
    assert!(dir.join("two.md").exists());
    assert!(!dir.join("broken.md").exists());
}

#[test]
fn convert_dir_on_missing_path_errors() {
    let temp_dir = TempDir::new().unwrap();
    assert!(convert_dir(&temp_dir.path().join("nope")).is_err());
}
