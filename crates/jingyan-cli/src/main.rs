//! jingyan CLI: search, list, stats, validation and YAML->Markdown
//! conversion over an experience library directory.
//!
//! Logging: set `RUST_LOG=jingyan=info` (or `warn`, `debug`) to see loader
//! diagnostics on stderr.
//!
//! Exit codes: 0 success with results, 1 empty result set, 2 path not
//! found or other fatal error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use jingyan::{
    DirectoryReport, Record, RecordStore, ValidationReport, Validator, convert_dir, convert_file,
};

#[derive(Parser, Debug)]
#[command(
    name = "jingyan",
    about = "Experience library CLI for search, validation and conversion",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Experience library root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = "experiences",
        global = true
    )]
    root: PathBuf,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search records by keyword, tech stack, difficulty or category.
    Search {
        /// Case-insensitive keyword over title/description/tags/content.
        #[arg(short = 'k', long)]
        keyword: Option<String>,
        /// Substring match against tech stack entries.
        #[arg(short = 't', long)]
        tech: Option<String>,
        /// One of beginner/intermediate/advanced/expert.
        #[arg(short = 'd', long)]
        difficulty: Option<String>,
        /// Exact category name.
        #[arg(short = 'c', long)]
        category: Option<String>,
        /// Narrow a category search by subcategory.
        #[arg(short = 's', long, requires = "category")]
        subcategory: Option<String>,
    },
    /// List every record in the library.
    List,
    /// Show aggregate statistics.
    Stats,
    /// Validate a record file or a directory tree.
    Validate {
        /// File or directory to validate (defaults to the library root).
        path: Option<PathBuf>,
        /// Show per-file results for clean files too.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Convert YAML records to Markdown.
    Convert {
        /// File or directory to convert (defaults to the library root).
        path: Option<PathBuf>,
        /// Output directory for a single-file conversion.
        #[arg(short = 'O', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Search {
            keyword,
            tech,
            difficulty,
            category,
            subcategory,
        } => {
            let store = load_store(&cli.root)?;
            let results = if let Some(keyword) = keyword {
                store.filter_by_keyword(keyword)
            } else if let Some(tech) = tech {
                store.filter_by_tech_stack(tech)
            } else if let Some(difficulty) = difficulty {
                store.filter_by_difficulty(difficulty)
            } else if let Some(category) = category {
                store.filter_by_category(category, subcategory.as_deref())
            } else {
                bail!("no search filter given; use --keyword, --tech, --difficulty or --category");
            };
            render_records(&results, cli.output)
        }
        Command::List => {
            let store = load_store(&cli.root)?;
            let all: Vec<&Record> = store.records().iter().collect();
            render_records(&all, cli.output)
        }
        Command::Stats => {
            let store = load_store(&cli.root)?;
            render_stats(&store, cli.output)
        }
        Command::Validate { path, verbose } => {
            let target = path.as_deref().unwrap_or(&cli.root);
            run_validate(target, *verbose, cli.output)
        }
        Command::Convert { path, out_dir } => {
            let target = path.as_deref().unwrap_or(&cli.root);
            run_convert(target, out_dir.as_deref(), cli.output)
        }
    }
}

fn load_store(root: &Path) -> Result<RecordStore> {
    RecordStore::load(root).with_context(|| format!("loading experiences from {}", root.display()))
}

fn render_records(records: &[&Record], output: OutputFormat) -> Result<ExitCode> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("❌ No matching experiences found");
            } else {
                println!("🔍 Found {} matching experiences:", records.len());
                for record in records {
                    print_record_card(record);
                    println!("{}", "-".repeat(80));
                }
            }
        }
    }
    if records.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_record_card(record: &Record) {
    println!();
    println!("📋 {}", record.title);
    println!(
        "🏷️  Category: {} > {}",
        record.category, record.subcategory
    );
    println!("⭐ Difficulty: {}", record.difficulty);
    println!("🔧 Tech stack: {}", record.tech_stack.join(", "));
    println!("📝 Description: {}", record.description);
    println!("📁 File: {}", record.file_path);
}

fn render_stats(store: &RecordStore, output: OutputFormat) -> Result<ExitCode> {
    let stats = store.stats();
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("📊 Experience library statistics:");
            println!("Total experiences: {}", stats.total);
            println!(
                "Categories: {}",
                serde_json::to_string_pretty(&stats.categories)?
            );
            println!(
                "Difficulties: {}",
                serde_json::to_string_pretty(&stats.difficulties)?
            );
            println!("Top tech stacks:");
            for (tech, count) in &stats.top_tech_stacks {
                println!("  {tech}: {count}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_validate(target: &Path, verbose: bool, output: OutputFormat) -> Result<ExitCode> {
    if !target.exists() {
        bail!("path not found: {}", target.display());
    }

    if target.is_file() {
        let report = Validator::new().validate_file(target);
        match output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_file_report(target, &report),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = Validator::new().validate_dir(target)?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_directory_report(target, &report, verbose),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_file_report(path: &Path, report: &ValidationReport) {
    println!("📋 Validating file: {}", path.display());
    if report.valid {
        println!("✅ File format is valid");
    } else {
        println!("❌ File has errors");
    }
    if !report.errors.is_empty() {
        println!("\n🚨 Errors:");
        for error in &report.errors {
            println!("  - {error}");
        }
    }
    if !report.warnings.is_empty() {
        println!("\n⚠️  Warnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}

fn print_directory_report(target: &Path, report: &DirectoryReport, verbose: bool) {
    println!("📁 Validating directory: {}", target.display());
    println!("Total files: {}", report.total_files);
    println!("Valid files: {}", report.valid_files);
    let rate = pass_rate(report.valid_files, report.total_files);
    println!(
        "Pass rate: {}/{} ({rate:.1}%)",
        report.valid_files, report.total_files
    );

    for file in &report.files {
        let clean = file.report.valid && file.report.warnings.is_empty();
        if !verbose && clean {
            continue;
        }
        let status = if file.report.valid { "✅" } else { "❌" };
        println!("{status} {}", file.path);
        for error in &file.report.errors {
            println!("    🚨 {error}");
        }
        for warning in &file.report.warnings {
            println!("    ⚠️  {warning}");
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn pass_rate(valid: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        valid as f64 / total as f64 * 100.0
    }
}

fn run_convert(target: &Path, out_dir: Option<&Path>, output: OutputFormat) -> Result<ExitCode> {
    if !target.exists() {
        bail!("path not found: {}", target.display());
    }

    if target.is_file() {
        if target.extension().is_none_or(|ext| ext != "yaml") {
            bail!("not a YAML record file: {}", target.display());
        }
        let out_path = convert_file(target, out_dir)
            .with_context(|| format!("converting {}", target.display()))?;
        match output {
            OutputFormat::Json => {
                let report = serde_json::json!({ "converted": [out_path.to_string_lossy()] });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                println!("✅ Converted: {} → {}", target.display(), out_path.display());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = convert_dir(target)?;
    match output {
        OutputFormat::Json => {
            let report =
                serde_json::json!({ "total": summary.total, "converted": summary.converted });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "Converted {}/{} YAML files",
                summary.converted, summary.total
            );
        }
    }
    if summary.total > 0 && summary.converted == 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
