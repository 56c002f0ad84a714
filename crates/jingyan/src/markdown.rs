//! Metadata extraction from Markdown experience documents.
//!
//! Markdown records encode their metadata by convention rather than schema:
//! the first `# ` heading is the title, a leading blockquote of
//! `> **Label**: value` lines carries difficulty/tech-stack/provenance, and
//! a `## 背景描述` section holds the background description. Every function
//! here is pure text-in fields-out so edge cases are testable without file
//! I/O.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Difficulty;

/// Compile a pattern, falling back to a never-matching regex on error.
pub(crate) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?m)^#\s+(.+)$"));
static META_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^>\s*\*\*([^*]+)\*\*\s*[:：]\s*(.*)$"));
static BACKGROUND_SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?s)(?m)^##\s*(?:背景描述|Background)\s*\n(.*?)(?:^#|\z)"));

/// Metadata block label for the star-rated difficulty.
pub const LABEL_DIFFICULTY: &str = "难度等级";
/// Metadata block label for the comma-separated tech stack.
pub const LABEL_TECH_STACK: &str = "技术栈";
/// Metadata block label for the origin project.
pub const LABEL_SOURCE: &str = "来源";
/// Metadata block label for the applicable scope.
pub const LABEL_SCOPE: &str = "适用范围";

/// Maximum description length before truncation.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Fields recovered from a Markdown document.
///
/// Every field is best-effort: a document with no extractable structure
/// yields the empty/default shape rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownMeta {
    /// First top-level heading, if any.
    pub title: Option<String>,
    /// Star-rating difficulty, defaulting to intermediate.
    pub difficulty: Difficulty,
    /// Comma-split tech stack entries.
    pub tech_stack: Vec<String>,
    /// Background description, truncated to [`DESCRIPTION_LIMIT`] chars.
    pub description: String,
    /// Origin project (`来源` label).
    pub source: Option<String>,
    /// Applicable scope (`适用范围` label).
    pub applicable_scope: Option<String>,
}

/// Extract all metadata from a Markdown document.
#[must_use]
pub fn extract_meta(content: &str) -> MarkdownMeta {
    let block = metadata_block(content);
    let lookup = |label: &str| {
        block
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.clone())
    };

    let difficulty = lookup(LABEL_DIFFICULTY)
        .map(|value| Difficulty::from_stars(count_stars(&value)))
        .unwrap_or_default();
    let tech_stack = lookup(LABEL_TECH_STACK)
        .map(|value| split_comma_list(&value))
        .unwrap_or_default();

    MarkdownMeta {
        title: extract_title(content),
        difficulty,
        tech_stack,
        description: extract_description(content),
        source: lookup(LABEL_SOURCE).filter(|s| !s.is_empty()),
        applicable_scope: lookup(LABEL_SCOPE).filter(|s| !s.is_empty()),
    }
}

/// First `# ` heading of the document, if present.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
    HEADING_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Parse the leading blockquote metadata block into ordered label/value
/// pairs.
///
/// The block is the first contiguous run of `>`-prefixed lines. A value
/// extends from its `**Label**:` line through any following unlabelled
/// blockquote lines, up to the next labelled line or the end of the block.
#[must_use]
pub fn metadata_block(content: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut in_block = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with('>') {
            if in_block {
                break;
            }
            continue;
        }
        in_block = true;

        if let Some(caps) = META_LABEL_REGEX.captures(trimmed) {
            let label = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let value = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            entries.push((label, value));
        } else if let Some((_, value)) = entries.last_mut() {
            // Continuation line: the value spans to the next labelled line.
            let continuation = trimmed.trim_start_matches('>').trim();
            if !continuation.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(continuation);
            }
        }
    }

    entries
}

/// Best-effort background description.
///
/// Prefers the body of the `## 背景描述` section (up to the next heading);
/// falls back to the text between the title and the first second-level
/// heading, skipping the metadata blockquote. Truncated to
/// [`DESCRIPTION_LIMIT`] characters with a `...` marker.
#[must_use]
pub fn extract_description(content: &str) -> String {
    let section = BACKGROUND_SECTION_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| !text.is_empty());

    let raw = section.unwrap_or_else(|| leading_text(content));
    truncate_description(&raw)
}

/// Text between the title line and the first `##` heading, with blockquote
/// metadata lines removed.
fn leading_text(content: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut past_title = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("##") {
            break;
        }
        if !past_title {
            if trimmed.starts_with("# ") {
                past_title = true;
            }
            continue;
        }
        if trimmed.starts_with('>') {
            continue;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

/// Truncate to the description limit, appending an ellipsis marker.
#[must_use]
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    truncated.push_str("...");
    truncated
}

/// Number of star glyphs in a metadata value.
#[must_use]
pub fn count_stars(value: &str) -> usize {
    value.chars().filter(|c| *c == '⭐').count()
}

/// Split a comma-separated metadata value, trimming each entry.
#[must_use]
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}
