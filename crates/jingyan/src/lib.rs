//! Jingyan - experience library core.
//!
//! Loads a directory tree of experience records, normalizes two storage
//! formats into one record model, and exposes search, validation and
//! conversion over the in-memory collection.
//!
//! # Architecture
//!
//! ```text
//! crates/jingyan/src/
//! ├── lib.rs       # Main module and exports
//! ├── error.rs     # Error taxonomy
//! ├── record.rs    # Canonical Record model
//! ├── classify.rs  # Path-based category inference
//! ├── markdown.rs  # Markdown metadata extraction
//! ├── tags.rs      # Tag declaration parsing and synthesis
//! ├── loader.rs    # Directory walk + format normalization
//! ├── store.rs     # In-memory index: filters and statistics
//! ├── validate.rs  # YAML structure validation
//! └── convert.rs   # YAML -> Markdown conversion
//! ```
//!
//! # Record formats
//!
//! YAML records are direct key-value documents already in the canonical
//! shape. Markdown records encode metadata by convention:
//!
//! ```markdown
//! # State Management
//!
//! > **难度等级**: ⭐⭐⭐⭐
//! > **技术栈**: Flutter, Bloc
//!
//! ## 背景描述
//!
//! Using Bloc for predictable state.
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod classify;
pub mod convert;
pub mod error;
pub mod loader;
pub mod markdown;
pub mod record;
pub mod store;
pub mod tags;
pub mod validate;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::PathClassifier;
pub use convert::{ConversionSummary, convert_dir, convert_file, render_markdown};
pub use error::ExperienceError;
pub use loader::{ExperienceLoader, synthesize_id};
pub use markdown::{MarkdownMeta, extract_meta};
pub use record::{
    Alternative, CodeExample, Difficulty, Problem, Record, RecordFormat, RecordMetadata, Solution,
    Tradeoffs,
};
pub use store::{RecordStore, StoreStats, TOP_TECH_LIMIT};
pub use tags::derive_tags;
pub use validate::{DirectoryReport, FileReport, ValidationReport, Validator};

// ============================================================================
// Version
// ============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
