//! Tag derivation for Markdown records.
//!
//! An explicit inline `标签: [a, b, c]` declaration wins; otherwise tags
//! are synthesized from the tech stack plus the path-derived
//! classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::compile_regex;

static TAG_DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"标签\s*[:：]\s*\[([^\]]*)\]"));

/// Parse an explicit inline tag declaration, if the document has one.
///
/// Entries are comma-split with surrounding single or double quotes
/// stripped; an empty bracket list yields an empty vector (still treated
/// as an explicit declaration).
#[must_use]
pub fn explicit_tags(content: &str) -> Option<Vec<String>> {
    let caps = TAG_DECLARATION_REGEX.captures(content)?;
    let list = caps.get(1).map_or("", |m| m.as_str());
    Some(
        list.split(',')
            .map(|entry| {
                entry
                    .trim()
                    .trim_matches(|c| c == '\'' || c == '"')
                    .trim()
                    .to_string()
            })
            .filter(|entry| !entry.is_empty())
            .collect(),
    )
}

/// Derive the tag sequence for a Markdown record.
///
/// Explicit declarations override synthesis. Synthesized order is tech
/// stack entries first, then category, then subcategory (unless it is the
/// `general` default). Duplicate suppression is presence-based without
/// case normalization.
#[must_use]
pub fn derive_tags(
    content: &str,
    tech_stack: &[String],
    category: &str,
    subcategory: &str,
) -> Vec<String> {
    if let Some(tags) = explicit_tags(content) {
        return tags;
    }

    let mut tags: Vec<String> = tech_stack.to_vec();
    if !tags.iter().any(|t| t == category) {
        tags.push(category.to_string());
    }
    if subcategory != "general" && !tags.iter().any(|t| t == subcategory) {
        tags.push(subcategory.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_declaration_wins() {
        let content = "# T\n\n标签: [cache, 'latency', \"redis\"]\n";
        let tags = derive_tags(content, &["Flutter".to_string()], "performance", "caching");
        assert_eq!(tags, vec!["cache", "latency", "redis"]);
    }

    #[test]
    fn synthesized_order_is_stack_category_subcategory() {
        let stack = vec!["Redis".to_string(), "Lua".to_string()];
        let tags = derive_tags("no declaration", &stack, "performance", "caching");
        assert_eq!(tags, vec!["Redis", "Lua", "performance", "caching"]);
    }

    #[test]
    fn general_subcategory_is_not_appended() {
        let tags = derive_tags("", &[], "debugging", "general");
        assert_eq!(tags, vec!["debugging"]);
    }

    #[test]
    fn presence_check_is_case_sensitive() {
        // `Cache` and `cache` are distinct on purpose: suppression is
        // presence-based without case normalization.
        let stack = vec!["Cache".to_string()];
        let tags = derive_tags("", &stack, "cache", "general");
        assert_eq!(tags, vec!["Cache", "cache"]);
    }

    #[test]
    fn duplicates_are_suppressed() {
        let stack = vec!["performance".to_string()];
        let tags = derive_tags("", &stack, "performance", "caching");
        assert_eq!(tags, vec!["performance", "caching"]);
    }
}
