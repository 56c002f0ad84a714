//! In-memory record store with filter and aggregate operations.
//!
//! Owns the loaded record collection for the process lifetime. The set is
//! assumed small; every filter is a linear scan over the full collection.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::error::ExperienceError;
use crate::loader::ExperienceLoader;
use crate::record::{Record, RecordFormat};

/// Number of technology names reported by [`RecordStore::stats`].
pub const TOP_TECH_LIMIT: usize = 10;

/// Aggregate statistics over the loaded records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreStats {
    /// Total number of records.
    pub total: usize,
    /// Record count per category.
    pub categories: HashMap<String, usize>,
    /// Record count per difficulty.
    pub difficulties: HashMap<String, usize>,
    /// Most frequent technology names with counts, descending; ties keep
    /// first-encountered order.
    pub top_tech_stacks: Vec<(String, usize)>,
}

/// The in-memory collection of normalized records.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Build a store over an already loaded collection.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load every record under `root` into a fresh store.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceError::RootNotFound`] when `root` does not
    /// exist.
    pub fn load(root: &Path) -> Result<Self, ExperienceError> {
        let records = ExperienceLoader::new().load_dir(root)?;
        Ok(Self::from_records(records))
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring search across title, description, tags,
    /// category and subcategory; Markdown records additionally match on
    /// their full content, YAML records on the solution's approach and
    /// implementation text.
    #[must_use]
    pub fn filter_by_keyword(&self, keyword: &str) -> Vec<&Record> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|record| keyword_matches(record, &needle))
            .collect()
    }

    /// Case-insensitive substring match against any tech stack entry.
    #[must_use]
    pub fn filter_by_tech_stack(&self, tech: &str) -> Vec<&Record> {
        let needle = tech.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record
                    .tech_stack
                    .iter()
                    .any(|entry| entry.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Exact case-insensitive match on the difficulty name.
    #[must_use]
    pub fn filter_by_difficulty(&self, difficulty: &str) -> Vec<&Record> {
        let needle = difficulty.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.difficulty.as_str() == needle)
            .collect()
    }

    /// Exact case-insensitive match on category, optionally narrowed by
    /// subcategory.
    #[must_use]
    pub fn filter_by_category(&self, category: &str, subcategory: Option<&str>) -> Vec<&Record> {
        let category = category.to_lowercase();
        let subcategory = subcategory.map(str::to_lowercase);
        self.records
            .iter()
            .filter(|record| {
                record.category.to_lowercase() == category
                    && subcategory
                        .as_ref()
                        .is_none_or(|sub| record.subcategory.to_lowercase() == *sub)
            })
            .collect()
    }

    /// Aggregate statistics: totals, per-category and per-difficulty
    /// counts, and the top technology names by frequency.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let mut categories: HashMap<String, usize> = HashMap::new();
        let mut difficulties: HashMap<String, usize> = HashMap::new();
        // First-encounter order so frequency ties resolve deterministically
        // under the stable sort below.
        let mut tech_order: Vec<String> = Vec::new();
        let mut tech_counts: HashMap<String, usize> = HashMap::new();

        for record in &self.records {
            *categories.entry(record.category.clone()).or_insert(0) += 1;
            *difficulties
                .entry(record.difficulty.as_str().to_string())
                .or_insert(0) += 1;
            for tech in &record.tech_stack {
                if !tech_counts.contains_key(tech) {
                    tech_order.push(tech.clone());
                }
                *tech_counts.entry(tech.clone()).or_insert(0) += 1;
            }
        }

        let mut top: Vec<(String, usize)> = tech_order
            .into_iter()
            .map(|tech| {
                let count = tech_counts.get(&tech).copied().unwrap_or(0);
                (tech, count)
            })
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1));
        top.truncate(TOP_TECH_LIMIT);

        StoreStats {
            total: self.records.len(),
            categories,
            difficulties,
            top_tech_stacks: top,
        }
    }
}

fn keyword_matches(record: &Record, needle: &str) -> bool {
    if record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || record.category.to_lowercase().contains(needle)
        || record.subcategory.to_lowercase().contains(needle)
    {
        return true;
    }

    match record.format {
        RecordFormat::Markdown => record
            .content
            .as_ref()
            .is_some_and(|content| content.to_lowercase().contains(needle)),
        RecordFormat::Yaml => record.solution.as_ref().is_some_and(|solution| {
            solution.approach.to_lowercase().contains(needle)
                || solution.implementation.to_lowercase().contains(needle)
        }),
    }
}
