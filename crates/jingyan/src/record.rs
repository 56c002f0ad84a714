//! Record types for the experience library.
//!
//! A [`Record`] is the canonical in-memory unit produced by the loader,
//! regardless of whether the backing file is YAML or Markdown. All shared
//! fields live directly on the struct; format-specific material sits in
//! optional fields selected by [`RecordFormat`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Difficulty levels for experience records.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry-level material.
    Beginner,
    /// Everyday working knowledge.
    #[default]
    Intermediate,
    /// Requires solid background in the area.
    Advanced,
    /// Deep specialist knowledge.
    Expert,
}

impl std::str::FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lenient on purpose: an unknown or non-string difficulty must not abort
// the load pass. The validator re-reads the raw YAML and reports it as an
// error.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_yaml::Value::deserialize(deserializer)?;
        Ok(raw.as_str().and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

impl Difficulty {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Decode a star-glyph count (`⭐` x N in a metadata block).
    ///
    /// 2 → beginner, 3 → intermediate, 4 → advanced, 5 → expert; any other
    /// count falls back to intermediate.
    #[must_use]
    pub fn from_stars(count: usize) -> Self {
        match count {
            2 => Self::Beginner,
            4 => Self::Advanced,
            5 => Self::Expert,
            _ => Self::Intermediate,
        }
    }

    /// Star-glyph rendering, the inverse of [`Difficulty::from_stars`].
    #[must_use]
    pub fn stars(self) -> &'static str {
        match self {
            Self::Beginner => "⭐⭐",
            Self::Intermediate => "⭐⭐⭐",
            Self::Advanced => "⭐⭐⭐⭐",
            Self::Expert => "⭐⭐⭐⭐⭐",
        }
    }
}

/// Storage format a record was loaded from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// Direct key-value YAML schema.
    #[default]
    Yaml,
    /// Free-text Markdown with metadata conventions.
    Markdown,
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// A single code example inside a solution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeExample {
    /// Language of the fenced block.
    #[serde(default)]
    pub language: String,
    /// The example source text.
    #[serde(default)]
    pub code: String,
    /// Short description shown before the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explanation shown after the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Suggested file name for the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Solution section of a YAML record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Solution {
    /// High-level approach.
    #[serde(default)]
    pub approach: String,
    /// Concrete implementation notes.
    #[serde(default)]
    pub implementation: String,
    /// Worked code examples.
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

/// Problem section of a YAML record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    /// Concrete scenario the experience arose from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Challenges faced.
    #[serde(default)]
    pub challenges: Vec<String>,
    /// Constraints that shaped the solution.
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// An alternative approach inside the tradeoffs section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alternative {
    /// Name of the alternative.
    #[serde(default)]
    pub name: String,
    /// What it is.
    #[serde(default)]
    pub description: String,
    /// Its upsides.
    #[serde(default)]
    pub pros: Vec<String>,
    /// Its downsides.
    #[serde(default)]
    pub cons: Vec<String>,
}

/// Tradeoffs section of a YAML record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tradeoffs {
    /// Advantages of the chosen solution.
    #[serde(default)]
    pub pros: Vec<String>,
    /// Disadvantages of the chosen solution.
    #[serde(default)]
    pub cons: Vec<String>,
    /// Approaches that were considered instead.
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// Provenance metadata of a YAML record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    /// Author of the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation date, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update date, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Project the experience came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_project: Option<String>,
    /// Self-assessed quality on a 1-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_subcategory() -> String {
    "unknown".to_string()
}

/// The canonical experience record indexed by the store.
///
/// Deserializes directly from a YAML record file; every field defaults so
/// structurally incomplete files still load (the validator, not the
/// deserializer, reports what is missing). Markdown records are assembled
/// field by field in the loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Stable identifier. Synthesized for Markdown records as
    /// `category-subcategory-filestem` (lowercased, spaces to hyphens).
    #[serde(default)]
    pub id: String,
    /// Display name, defaulting to the file stem when absent.
    #[serde(default)]
    pub title: String,
    /// Top-level topic classification.
    #[serde(default = "default_category")]
    pub category: String,
    /// Second-level topic classification.
    #[serde(default = "default_subcategory")]
    pub subcategory: String,
    /// Discovery tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Difficulty level.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Technologies involved.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Short description; truncated to 200 chars for Markdown records.
    #[serde(default)]
    pub description: String,
    /// Storage format the record was loaded from.
    #[serde(default)]
    pub format: RecordFormat,
    /// Path of the backing file.
    #[serde(default)]
    pub file_path: String,

    // YAML-only sections.
    /// Solution section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    /// Problem section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<Problem>,
    /// Benefit analysis, free key-value pairs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub benefits: BTreeMap<String, serde_yaml::Value>,
    /// Tradeoff analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradeoffs: Option<Tradeoffs>,
    /// Situations where the experience applies.
    #[serde(default)]
    pub applicable_scenarios: Vec<String>,
    /// Things to avoid.
    #[serde(default)]
    pub anti_patterns: Vec<String>,
    /// Identifiers of related records.
    #[serde(default)]
    pub related_experiences: Vec<String>,
    /// Provenance metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,

    // Markdown-only fields.
    /// Full raw document body, retained for full-text keyword search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Origin project from the metadata block (`来源`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Applicable scope from the metadata block (`适用范围`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_mapping_is_total() {
        assert_eq!(Difficulty::from_stars(2), Difficulty::Beginner);
        assert_eq!(Difficulty::from_stars(3), Difficulty::Intermediate);
        assert_eq!(Difficulty::from_stars(4), Difficulty::Advanced);
        assert_eq!(Difficulty::from_stars(5), Difficulty::Expert);
        assert_eq!(Difficulty::from_stars(0), Difficulty::Intermediate);
        assert_eq!(Difficulty::from_stars(7), Difficulty::Intermediate);
    }

    #[test]
    fn stars_round_trip() {
        for d in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
            Difficulty::Expert,
        ] {
            assert_eq!(Difficulty::from_stars(d.stars().chars().count()), d);
        }
    }

    #[test]
    fn unknown_difficulty_defaults_to_intermediate() {
        let record: Record = serde_yaml::from_str("difficulty: brutal\n").unwrap();
        assert_eq!(record.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn non_string_difficulty_still_loads() {
        let record: Record = serde_yaml::from_str("title: t\ndifficulty: 3\n").unwrap();
        assert_eq!(record.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn missing_classification_gets_defaults() {
        let record: Record = serde_yaml::from_str("title: bare\n").unwrap();
        assert_eq!(record.category, "general");
        assert_eq!(record.subcategory, "unknown");
        assert_eq!(record.format, RecordFormat::Yaml);
    }
}
