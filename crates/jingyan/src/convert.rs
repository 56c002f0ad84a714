//! YAML to Markdown conversion.
//!
//! Renders a YAML record into the Markdown document convention the loader
//! understands, so converted files round-trip: the blockquote metadata
//! block keeps the star-rated difficulty and the comma-joined tech stack.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ExperienceError;
use crate::loader::ExperienceLoader;
use crate::markdown::{LABEL_DIFFICULTY, LABEL_SCOPE, LABEL_SOURCE, LABEL_TECH_STACK};
use crate::record::Record;

/// Outcome of a directory conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// YAML files found.
    pub total: usize,
    /// Files successfully converted.
    pub converted: usize,
}

/// Render a record as a Markdown experience document.
#[must_use]
pub fn render_markdown(record: &Record) -> String {
    let mut lines: Vec<String> = Vec::new();

    let title = if record.title.is_empty() {
        "未命名经验"
    } else {
        &record.title
    };
    lines.push(format!("# {title}"));
    lines.push(String::new());
    push_meta_block(record, &mut lines);
    lines.push(String::new());

    if !record.description.is_empty() {
        lines.push("## 背景描述".to_string());
        lines.push(String::new());
        lines.push(record.description.clone());
        lines.push(String::new());
    }

    push_problem(record, &mut lines);
    push_solution(record, &mut lines);
    push_benefits(record, &mut lines);
    push_tradeoffs(record, &mut lines);

    if !record.applicable_scenarios.is_empty() {
        lines.push("## 适用场景".to_string());
        lines.push(String::new());
        for scenario in &record.applicable_scenarios {
            lines.push(format!("- {scenario}"));
        }
        lines.push(String::new());
    }

    if !record.anti_patterns.is_empty() {
        lines.push("## 注意事项".to_string());
        lines.push(String::new());
        for anti_pattern in &record.anti_patterns {
            lines.push(format!("- ⚠️ {anti_pattern}"));
        }
        lines.push(String::new());
    }

    if !record.related_experiences.is_empty() {
        lines.push("## 相关经验".to_string());
        lines.push(String::new());
        for related in &record.related_experiences {
            lines.push(format!("- [{related}]({related})"));
        }
        lines.push(String::new());
    }

    push_update_footer(record, &mut lines);

    lines.join("\n")
}

fn push_meta_block(record: &Record, lines: &mut Vec<String>) {
    let source_project = record
        .metadata
        .as_ref()
        .and_then(|meta| meta.source_project.as_deref())
        .filter(|s| !s.is_empty());
    if let Some(source) = source_project {
        lines.push(format!("> **{LABEL_SOURCE}**: {source}"));
    }

    if !record.category.is_empty() && !record.subcategory.is_empty() {
        lines.push(format!(
            "> **{LABEL_SCOPE}**: {}项目的{}相关问题",
            title_case(&record.category),
            record.subcategory
        ));
    }

    lines.push(format!(
        "> **{LABEL_DIFFICULTY}**: {}",
        record.difficulty.stars()
    ));

    if !record.tech_stack.is_empty() {
        lines.push(format!(
            "> **{LABEL_TECH_STACK}**: {}",
            record.tech_stack.join(", ")
        ));
    }
}

fn push_problem(record: &Record, lines: &mut Vec<String>) {
    let Some(problem) = &record.problem else {
        return;
    };
    lines.push("## 问题场景".to_string());
    lines.push(String::new());

    if let Some(scenario) = problem.scenario.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("**具体场景**: {scenario}"));
        lines.push(String::new());
    }
    if !problem.challenges.is_empty() {
        lines.push("**面临挑战**:".to_string());
        for challenge in &problem.challenges {
            lines.push(format!("- {challenge}"));
        }
        lines.push(String::new());
    }
    if !problem.constraints.is_empty() {
        lines.push("**约束条件**:".to_string());
        for constraint in &problem.constraints {
            lines.push(format!("- {constraint}"));
        }
        lines.push(String::new());
    }
}

fn push_solution(record: &Record, lines: &mut Vec<String>) {
    let Some(solution) = &record.solution else {
        return;
    };
    lines.push("## 解决方案".to_string());
    lines.push(String::new());

    if !solution.approach.is_empty() {
        lines.push("### 解决思路".to_string());
        lines.push(String::new());
        lines.push(solution.approach.clone());
        lines.push(String::new());
    }
    if !solution.implementation.is_empty() {
        lines.push("### 具体实现".to_string());
        lines.push(String::new());
        lines.push(solution.implementation.clone());
        lines.push(String::new());
    }
    if solution.code_examples.is_empty() {
        return;
    }

    lines.push("### 代码示例".to_string());
    lines.push(String::new());
    for (index, example) in solution.code_examples.iter().enumerate() {
        let number = index + 1;
        match example.filename.as_deref().filter(|f| !f.is_empty()) {
            Some(filename) => lines.push(format!("#### {number}. {filename}")),
            None => lines.push(format!("#### 示例 {number}")),
        }
        lines.push(String::new());

        if let Some(description) = example.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(description.to_string());
            lines.push(String::new());
        }
        if !example.code.is_empty() {
            let language = if example.language.is_empty() {
                "text"
            } else {
                &example.language
            };
            lines.push(format!("```{language}"));
            lines.push(example.code.clone());
            lines.push("```".to_string());
            lines.push(String::new());
        }
        if let Some(explanation) = example.explanation.as_deref().filter(|e| !e.is_empty()) {
            lines.push(format!("**说明**: {explanation}"));
            lines.push(String::new());
        }
    }
}

fn push_benefits(record: &Record, lines: &mut Vec<String>) {
    if record.benefits.is_empty() {
        return;
    }
    lines.push("## 收益分析".to_string());
    lines.push(String::new());
    for (key, value) in &record.benefits {
        if let Some(rendered) = scalar_to_string(value) {
            lines.push(format!("**{}**: {rendered}", translate_benefit_key(key)));
            lines.push(String::new());
        }
    }
}

fn push_tradeoffs(record: &Record, lines: &mut Vec<String>) {
    let Some(tradeoffs) = &record.tradeoffs else {
        return;
    };
    lines.push("## 权衡分析".to_string());
    lines.push(String::new());

    if !tradeoffs.pros.is_empty() {
        lines.push("### 优势".to_string());
        for pro in &tradeoffs.pros {
            lines.push(format!("- ✅ {pro}"));
        }
        lines.push(String::new());
    }
    if !tradeoffs.cons.is_empty() {
        lines.push("### 劣势".to_string());
        for con in &tradeoffs.cons {
            lines.push(format!("- ❌ {con}"));
        }
        lines.push(String::new());
    }
    if !tradeoffs.alternatives.is_empty() {
        lines.push("### 替代方案".to_string());
        lines.push(String::new());
        for alt in &tradeoffs.alternatives {
            lines.push(format!("**{}**: {}", alt.name, alt.description));
            if !alt.pros.is_empty() {
                lines.push(format!("- 优势: {}", alt.pros.join(", ")));
            }
            if !alt.cons.is_empty() {
                lines.push(format!("- 劣势: {}", alt.cons.join(", ")));
            }
            lines.push(String::new());
        }
    }
}

fn push_update_footer(record: &Record, lines: &mut Vec<String>) {
    let Some(metadata) = &record.metadata else {
        return;
    };
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("**更新记录**:".to_string());

    let created = metadata.created_at.as_deref().filter(|s| !s.is_empty());
    let updated = metadata.updated_at.as_deref().filter(|s| !s.is_empty());
    if let Some(created) = created {
        lines.push(format!("- {created}: 创建"));
    }
    if let Some(updated) = updated {
        if created != Some(updated) {
            lines.push(format!("- {updated}: 更新"));
        }
    }
    if let Some(author) = metadata.author.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("- 作者: {author}"));
    }
    if let Some(project) = metadata.source_project.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("- 来源项目: {project}"));
    }
}

/// Translate a benefit key to its display label.
fn translate_benefit_key(key: &str) -> String {
    match key {
        "performance_gain" => "性能提升".to_string(),
        "maintainability" => "可维护性".to_string(),
        "scalability" => "可扩展性".to_string(),
        "cost_reduction" => "成本降低".to_string(),
        other => title_case(&other.replace('_', " ")),
    }
}

/// Render a YAML scalar for inline display; non-scalar or empty values are
/// skipped.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert one YAML record file to Markdown.
///
/// The output lands next to the source (or in `out_dir`) as `<stem>.md`.
///
/// # Errors
///
/// Returns an error when the source cannot be loaded or the output cannot
/// be written.
pub fn convert_file(yaml_path: &Path, out_dir: Option<&Path>) -> Result<PathBuf, ExperienceError> {
    let record = ExperienceLoader::new().load_file(yaml_path)?;
    let markdown = render_markdown(&record);

    let target_dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| yaml_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let stem = yaml_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("experience");
    let out_path = target_dir.join(format!("{stem}.md"));

    fs::write(&out_path, markdown).map_err(|source| ExperienceError::io(&out_path, source))?;
    Ok(out_path)
}

/// Convert every `*.yaml` file under a directory.
///
/// Per-file failures are logged and counted, not fatal.
///
/// # Errors
///
/// Returns [`ExperienceError::RootNotFound`] when `dir` does not exist.
pub fn convert_dir(dir: &Path) -> Result<ConversionSummary, ExperienceError> {
    if !dir.exists() {
        return Err(ExperienceError::RootNotFound(dir.to_path_buf()));
    }

    let mut summary = ConversionSummary::default();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "yaml") {
            continue;
        }
        summary.total += 1;
        match convert_file(path, None) {
            Ok(out_path) => {
                summary.converted += 1;
                log::info!("converted {} -> {}", path.display(), out_path.display());
            }
            Err(err) => log::warn!("failed to convert {}: {err}", path.display()),
        }
    }
    Ok(summary)
}
