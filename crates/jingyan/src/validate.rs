//! Structural validation of YAML experience records.
//!
//! Validation works on the raw `serde_yaml::Value` rather than on
//! [`crate::record::Record`] so that structurally broken files can still
//! be inspected and reported field by field. Findings are split into
//! errors (block valid status) and warnings (advisory only).

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;
use walkdir::WalkDir;

use crate::error::ExperienceError;

/// Fields every YAML record must declare.
pub const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "title",
    "category",
    "subcategory",
    "tags",
    "difficulty",
    "tech_stack",
    "description",
];

/// The closed category vocabulary for YAML records.
pub const VALID_CATEGORIES: &[&str] = &[
    "architecture",
    "patterns",
    "debugging",
    "performance",
    "testing",
    "deployment",
];

/// Valid difficulty names.
pub const VALID_DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

/// Description lengths outside this range draw a warning.
const DESCRIPTION_MIN: usize = 20;
/// Upper bound of the advisory description length range.
const DESCRIPTION_MAX: usize = 200;

/// Outcome of validating one record file.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub valid: bool,
    /// Findings that block valid status.
    pub errors: Vec<String>,
    /// Advisory findings.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn finish(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validation outcome for a single file within a directory pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileReport {
    /// Path of the validated file.
    pub path: String,
    /// The file's validation outcome.
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Aggregated outcome of validating a directory tree.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DirectoryReport {
    /// Number of YAML record files inspected.
    pub total_files: usize,
    /// Number of files with no errors.
    pub valid_files: usize,
    /// Per-file outcomes, in walk order.
    pub files: Vec<FileReport>,
}

/// Validates YAML record structure against the library conventions.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    /// Create a validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a single YAML record file.
    ///
    /// A file that cannot be read or parsed yields a report with a single
    /// error rather than an `Err`; validation always produces a report.
    #[must_use]
    pub fn validate_file(&self, path: &Path) -> ValidationReport {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                return ValidationReport::finish(vec![format!("failed to read file: {err}")], vec![]);
            }
        };
        let value: Value = match serde_yaml::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                return ValidationReport::finish(
                    vec![format!("failed to parse file: {err}")],
                    vec![],
                );
            }
        };
        self.validate_value(&value, Some(path))
    }

    /// Validate an already parsed YAML document.
    ///
    /// `path` enables the file-placement check; pass `None` for in-memory
    /// documents.
    #[must_use]
    pub fn validate_value(&self, value: &Value, path: Option<&Path>) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_required_fields(value, &mut errors);
        check_field_formats(value, &mut errors, &mut warnings);
        check_content_quality(value, &mut errors, &mut warnings);
        if let Some(path) = path {
            check_file_placement(value, path, &mut warnings);
        }

        ValidationReport::finish(errors, warnings)
    }

    /// Validate every `*.yaml` file under a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceError::RootNotFound`] when `dir` does not
    /// exist.
    pub fn validate_dir(&self, dir: &Path) -> Result<DirectoryReport, ExperienceError> {
        if !dir.exists() {
            return Err(ExperienceError::RootNotFound(dir.to_path_buf()));
        }

        let mut report = DirectoryReport::default();
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "yaml") {
                continue;
            }
            let file_report = self.validate_file(path);
            report.total_files += 1;
            if file_report.valid {
                report.valid_files += 1;
            }
            report.files.push(FileReport {
                path: path.to_string_lossy().into_owned(),
                report: file_report,
            });
        }
        Ok(report)
    }
}

fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

fn check_required_fields(value: &Value, errors: &mut Vec<String>) {
    for field in REQUIRED_FIELDS {
        match value.get(field) {
            None => errors.push(format!("missing required field: {field}")),
            Some(Value::Null) => errors.push(format!("field {field} must not be empty")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.push(format!("field {field} must not be empty"));
            }
            // Empty sequences are advisory, handled by the format checks.
            Some(_) => {}
        }
    }
}

// A present value outside the vocabulary is an error even when it is not a
// string; `difficulty: 3` must not slip through as valid.
fn check_enum_field(value: &Value, field: &str, allowed: &[&str], errors: &mut Vec<String>) {
    match value.get(field) {
        // Null is already reported by the required-field check.
        None | Some(Value::Null) => {}
        Some(Value::String(name)) if allowed.contains(&name.as_str()) => {}
        Some(Value::String(name)) => errors.push(format!("invalid {field}: {name}")),
        Some(other) => {
            let shown = serde_yaml::to_string(other).unwrap_or_default();
            errors.push(format!("invalid {field}: {}", shown.trim()));
        }
    }
}

fn check_field_formats(value: &Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    check_enum_field(value, "category", VALID_CATEGORIES, errors);
    check_enum_field(value, "difficulty", VALID_DIFFICULTIES, errors);

    match value.get("tags") {
        Some(Value::Sequence(tags)) if tags.is_empty() => {
            warnings.push("consider adding at least one tag".to_string());
        }
        Some(Value::Sequence(_)) | None => {}
        Some(_) => errors.push("tags must be a sequence".to_string()),
    }

    if let Some(stack) = value.get("tech_stack") {
        if !stack.is_sequence() {
            errors.push("tech_stack must be a sequence".to_string());
        }
    }

    if let (Some(id), Some(category)) = (str_field(value, "id"), str_field(value, "category")) {
        let prefix = format!("{category}-");
        if !id.starts_with(&prefix) {
            warnings.push(format!("id should start with {prefix}"));
        }
    }
}

fn check_content_quality(value: &Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if let Some(description) = str_field(value, "description") {
        let len = description.chars().count();
        if len < DESCRIPTION_MIN {
            warnings.push(format!(
                "description is short, aim for at least {DESCRIPTION_MIN} characters"
            ));
        } else if len > DESCRIPTION_MAX {
            warnings.push(format!(
                "description is long, aim for at most {DESCRIPTION_MAX} characters"
            ));
        }
    }

    match value.get("solution") {
        None => errors.push("missing solution field".to_string()),
        Some(solution) => {
            let approach = solution.get("approach").and_then(Value::as_str);
            if approach.is_none_or(|a| a.trim().is_empty()) {
                errors.push("solution.approach must not be empty".to_string());
            }
            check_code_examples(solution, errors, warnings);
        }
    }

    let metadata = value.get("metadata");
    let meta_str = |field: &str| {
        metadata
            .and_then(|meta| meta.get(field))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    };
    if meta_str("author").is_none() {
        warnings.push("consider adding author metadata".to_string());
    }
    if meta_str("created_at").is_none() {
        warnings.push("consider adding a creation date".to_string());
    }
    let quality_score = metadata
        .and_then(|meta| meta.get("quality_score"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if quality_score < 5.0 {
        warnings.push("low quality score, consider improving the content".to_string());
    }
}

fn check_code_examples(solution: &Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let examples = solution
        .get("code_examples")
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if examples.is_empty() {
        warnings.push("consider adding a code example".to_string());
        return;
    }
    for (index, example) in examples.iter().enumerate() {
        let number = index + 1;
        if str_field(example, "language").is_none_or(|s| s.trim().is_empty()) {
            errors.push(format!("code example {number} is missing a language field"));
        }
        if str_field(example, "code").is_none_or(|s| s.trim().is_empty()) {
            errors.push(format!("code example {number} is missing a code field"));
        }
    }
}

fn check_file_placement(value: &Value, path: &Path, warnings: &mut Vec<String>) {
    let Some(category) = str_field(value, "category").filter(|c| !c.is_empty()) else {
        return;
    };
    let parent = path.parent().map(|p| p.to_string_lossy().into_owned());
    if parent.is_none_or(|dir| !dir.contains(category)) {
        warnings.push(format!("file should live under a {category} directory"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    const COMPLETE: &str = r#"
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
    fn complete_record_is_valid() {
        let report = Validator::new().validate_value(&parse(COMPLETE), None);
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn missing_solution_is_exactly_one_error() {
        let yaml = COMPLETE.replace("solution:", "not_solution:");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(!report.valid);
        let solution_errors: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("solution"))
            .collect();
        assert_eq!(solution_errors.len(), 1);
    }

    #[test]
    fn empty_tags_warn_but_do_not_error() {
        let yaml = COMPLETE.replace("tags: [cache, latency]", "tags: []");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.warnings.iter().any(|w| w.contains("tag")));
    }

    #[test]
    fn invalid_enum_values_are_errors() {
        let yaml = COMPLETE
            .replace("category: performance", "category: cooking")
            .replace("difficulty: advanced", "difficulty: brutal");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(report.errors.iter().any(|e| e.contains("invalid category")));
        assert!(report.errors.iter().any(|e| e.contains("invalid difficulty")));
    }

    #[test]
    fn wrong_container_type_is_an_error() {
        let yaml = COMPLETE.replace("tags: [cache, latency]", "tags: cache");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(report.errors.iter().any(|e| e.contains("tags must be a sequence")));
    }

    #[test]
    fn code_example_without_language_is_an_error() {
        let yaml = COMPLETE.replace("language: lua", "lang: lua");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(report.errors.iter().any(|e| e.contains("missing a language")));
    }

    #[test]
    fn missing_metadata_draws_warnings() {
        let yaml = r#"
id: testing-flaky-suite
title: Flaky suite triage
category: testing
subcategory: ci
tags: [flaky]
difficulty: intermediate
tech_stack: [pytest]
description: Identifying and quarantining flaky tests in a large suite.
solution:
  approach: Quarantine then fix by failure cluster
"#;
        let report = Validator::new().validate_value(&parse(yaml), None);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("author")));
        assert!(report.warnings.iter().any(|w| w.contains("creation date")));
        assert!(report.warnings.iter().any(|w| w.contains("quality score")));
        assert!(report.warnings.iter().any(|w| w.contains("code example")));
    }

    #[test]
    fn id_prefix_mismatch_is_a_warning() {
        let yaml = COMPLETE.replace("id: performance-cache-warmup", "id: cache-warmup");
        let report = Validator::new().validate_value(&parse(&yaml), None);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("performance-")));
    }
}
