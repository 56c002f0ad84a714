//! Path-based category classification for Markdown records.
//!
//! Markdown records carry no declared category; it is inferred from the
//! directory layout of the experience library, where top-level directories
//! use a numeric ordering prefix (`01-architecture`, `02-patterns`) and may
//! nest per-ecosystem subdirectories (`01-architecture/flutter/`).

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::compile_regex;

/// Category directories carry a numeric ordering prefix: `01-architecture`.
static DIGIT_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^\d+-(.+)$"));

/// Ecosystem/tool directory names recognized as subcategories by default.
const DEFAULT_SUBCATEGORIES: &[&str] = &[
    "flutter",
    "react",
    "vue",
    "android",
    "ios",
    "rust",
    "python",
    "golang",
    "nodejs",
    "java",
    "docker",
    "kubernetes",
];

/// Infers `(category, subcategory)` from a record file's directory path.
///
/// The known-subcategory set is data, not code: callers can replace it to
/// teach the classifier new ecosystem names without touching the scan
/// logic.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    known_subcategories: HashSet<String>,
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SUBCATEGORIES.iter().map(ToString::to_string))
    }
}

impl PathClassifier {
    /// Build a classifier with an explicit known-subcategory set.
    pub fn new(known_subcategories: impl IntoIterator<Item = String>) -> Self {
        Self {
            known_subcategories: known_subcategories.into_iter().collect(),
        }
    }

    /// Whether a directory name is a recognized subcategory.
    #[must_use]
    pub fn is_known_subcategory(&self, name: &str) -> bool {
        self.known_subcategories.contains(name)
    }

    /// Infer `(category, subcategory)` for a record file path.
    ///
    /// Best-effort heuristic: ambiguous path shapes degrade to the
    /// `("general", "general")` fallback rather than failing.
    #[must_use]
    pub fn classify(&self, path: &Path) -> (String, String) {
        let parent = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str());
        let grandparent = path
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|s| s.to_str());

        let Some(parent) = parent.filter(|s| !s.is_empty()) else {
            return ("general".to_string(), "general".to_string());
        };

        // A grandparent with the digit prefix means the immediate parent is
        // the subcategory level: `01-architecture/flutter/notes.md`. Known
        // ecosystem names take the same route even without the prefix check
        // succeeding on their own.
        if let Some(grand) = grandparent {
            if let Some(category) = strip_digit_prefix(grand) {
                return (category, parent.to_string());
            }
            if self.is_known_subcategory(parent) {
                let category = strip_digit_prefix(grand).unwrap_or_else(|| grand.to_string());
                return (category, parent.to_string());
            }
        }

        // Flat layout: the parent directory itself names the category.
        let category = strip_digit_prefix(parent).unwrap_or_else(|| parent.to_string());
        (category, "general".to_string())
    }
}

/// Strip a `<digits>-` ordering prefix, returning the remaining name.
fn strip_digit_prefix(segment: &str) -> Option<String> {
    DIGIT_PREFIX_REGEX
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classify(path: &str) -> (String, String) {
        PathClassifier::default().classify(&PathBuf::from(path))
    }

    #[test]
    fn nested_ecosystem_directory() {
        let (cat, sub) = classify("experiences/01-architecture/flutter/notes.md");
        assert_eq!(cat, "architecture");
        assert_eq!(sub, "flutter");
    }

    #[test]
    fn digit_prefix_without_known_name() {
        let (cat, sub) = classify("experiences/03-debugging/tooling/crash.md");
        assert_eq!(cat, "debugging");
        assert_eq!(sub, "tooling");
    }

    #[test]
    fn flat_category_directory() {
        let (cat, sub) = classify("performance/cache.md");
        assert_eq!(cat, "performance");
        assert_eq!(sub, "general");
    }

    #[test]
    fn flat_digit_prefixed_directory() {
        let (cat, sub) = classify("02-patterns/repository.md");
        assert_eq!(cat, "patterns");
        assert_eq!(sub, "general");
    }

    #[test]
    fn shallow_path_falls_back_to_general() {
        let (cat, sub) = classify("orphan.md");
        assert_eq!(cat, "general");
        assert_eq!(sub, "general");
    }

    #[test]
    fn known_subcategory_without_digit_prefix() {
        let (cat, sub) = classify("experiences/architecture/react/hooks.md");
        assert_eq!(cat, "architecture");
        assert_eq!(sub, "react");
    }

    #[test]
    fn custom_subcategory_set() {
        let classifier = PathClassifier::new(["svelte".to_string()]);
        let (cat, sub) = classifier.classify(&PathBuf::from("lib/frontend/svelte/stores.md"));
        assert_eq!(cat, "frontend");
        assert_eq!(sub, "svelte");
    }
}
