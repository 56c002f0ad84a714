//! Record loading and normalization.
//!
//! Walks an experience directory, parses every `*.yaml` and `*.md` file
//! and normalizes both formats into [`Record`]. Files that fail to parse
//! are skipped with a diagnostic; the load pass itself only fails when the
//! root directory is missing.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::classify::PathClassifier;
use crate::error::ExperienceError;
use crate::markdown;
use crate::record::{Record, RecordFormat};
use crate::tags;

/// Loads records from an experience directory tree.
#[derive(Debug, Default)]
pub struct ExperienceLoader {
    classifier: PathClassifier,
}

impl ExperienceLoader {
    /// Create a loader with the default path classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with a custom path classifier.
    #[must_use]
    pub fn with_classifier(classifier: PathClassifier) -> Self {
        Self { classifier }
    }

    /// Load every record under `root`.
    ///
    /// Record construction is independent per file, so the parse pass runs
    /// in parallel; files that fail to parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceError::RootNotFound`] when `root` does not
    /// exist.
    pub fn load_dir(&self, root: &Path) -> Result<Vec<Record>, ExperienceError> {
        if !root.exists() {
            return Err(ExperienceError::RootNotFound(root.to_path_buf()));
        }

        let candidates: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_record_file(entry.path()))
            .map(|entry| entry.path().to_path_buf())
            .collect();

        let records: Vec<Record> = candidates
            .par_iter()
            .filter_map(|path| {
                // Classification looks at path segments relative to the
                // library root, not the filesystem prefix above it.
                let rel = path.strip_prefix(root).unwrap_or(path);
                match self.load_file_in(path, rel) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        log::warn!("skipping {}: {err}", path.display());
                        None
                    }
                }
            })
            .collect();

        log::info!(
            "loaded {} of {} record files from {}",
            records.len(),
            candidates.len(),
            root.display()
        );
        Ok(records)
    }

    /// Load and normalize a single record file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, has an unrecognized
    /// extension, or (YAML only) fails to parse.
    pub fn load_file(&self, path: &Path) -> Result<Record, ExperienceError> {
        self.load_file_in(path, path)
    }

    /// Load a record file, classifying Markdown by `rel`, the path
    /// relative to the library root.
    fn load_file_in(&self, path: &Path, rel: &Path) -> Result<Record, ExperienceError> {
        let content =
            fs::read_to_string(path).map_err(|source| ExperienceError::io(path, source))?;

        match extension(path) {
            Some("yaml") => Self::normalize_yaml(path, &content),
            Some("md") => Ok(self.normalize_markdown(path, rel, content)),
            _ => Err(ExperienceError::InvalidPath(path.to_path_buf())),
        }
    }

    /// YAML path: the file's own mapping is already the canonical shape;
    /// just graft on provenance.
    fn normalize_yaml(path: &Path, content: &str) -> Result<Record, ExperienceError> {
        let mut record: Record = serde_yaml::from_str(content)
            .map_err(|err| ExperienceError::parse(path, err.to_string()))?;
        record.format = RecordFormat::Yaml;
        record.file_path = path.to_string_lossy().into_owned();
        if record.title.is_empty() {
            record.title = file_stem(path);
        }
        Ok(record)
    }

    /// Markdown path: classify by directory, extract the metadata
    /// conventions, synthesize tags and id.
    fn normalize_markdown(&self, path: &Path, rel: &Path, content: String) -> Record {
        let (category, subcategory) = self.classifier.classify(rel);
        let meta = markdown::extract_meta(&content);
        let stem = file_stem(path);
        let tags = tags::derive_tags(&content, &meta.tech_stack, &category, &subcategory);

        Record {
            id: synthesize_id(&category, &subcategory, &stem),
            title: meta.title.unwrap_or_else(|| stem.clone()),
            category,
            subcategory,
            tags,
            difficulty: meta.difficulty,
            tech_stack: meta.tech_stack,
            description: meta.description,
            format: RecordFormat::Markdown,
            file_path: path.to_string_lossy().into_owned(),
            content: Some(content),
            source: meta.source,
            applicable_scope: meta.applicable_scope,
            ..Record::default()
        }
    }
}

/// Stable identifier for a Markdown record: `category-subcategory-stem`,
/// lowercased with spaces replaced by hyphens.
#[must_use]
pub fn synthesize_id(category: &str, subcategory: &str, stem: &str) -> String {
    format!("{category}-{subcategory}-{stem}")
        .to_lowercase()
        .replace(' ', "-")
}

fn is_record_file(path: &Path) -> bool {
    matches!(extension(path), Some("yaml" | "md"))
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_lowercased_and_hyphenated() {
        assert_eq!(
            synthesize_id("Architecture", "Flutter", "State Management"),
            "architecture-flutter-state-management"
        );
    }

    #[test]
    fn only_yaml_and_md_are_candidates() {
        assert!(is_record_file(Path::new("a/b.yaml")));
        assert!(is_record_file(Path::new("a/b.md")));
        assert!(!is_record_file(Path::new("a/b.yml")));
        assert!(!is_record_file(Path::new("a/b.json")));
        assert!(!is_record_file(Path::new("a/b")));
    }
}
