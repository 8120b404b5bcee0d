//! Batch command - validate many deed documents concurrently.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use deedcheck_core::rules::format_money;
use deedcheck_core::{DeedExtractor, DeedPipeline, ErrorKind, ValidationError, ValidationResult};

use super::{load_config, load_reference, ExtractorKind, RuleOverrides};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g. "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Write one JSON result per document into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// How to read deed fields from each input
    #[arg(short, long, value_enum, default_value = "labeled")]
    extractor: ExtractorKind,

    #[command(flatten)]
    overrides: RuleOverrides,
}

/// Result of validating a single file.
struct FileResult {
    path: PathBuf,
    result: ValidationResult,
    processing_time_ms: u64,
}

type SharedPipeline = Arc<DeedPipeline<Box<dyn DeedExtractor>>>;

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config);
    config.validate()?;

    let counties = load_reference(&config)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to validate",
        style("ℹ").blue(),
        files.len()
    );

    // Name clashes are caught before any document is validated.
    let result_names = match &args.output_dir {
        Some(output_dir) => {
            let names = output_names(&files)?;
            fs::create_dir_all(output_dir)?;
            names
        }
        None => Vec::new(),
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline: SharedPipeline = Arc::new(DeedPipeline::new(
        args.extractor.build(),
        counties,
        &config.validation,
    ));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || validate_file(path, &pipeline)).await?;
            anyhow::Ok(result)
        }));
    }

    // Joined in input order so reports are stable regardless of scheduling.
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await??);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for (file, name) in results.iter().zip(&result_names) {
            let output_path = output_dir.join(name);

            let content = if config.output.pretty_json {
                serde_json::to_string_pretty(&file.result)?
            } else {
                serde_json::to_string(&file.result)?
            };
            fs::write(&output_path, content)?;
            debug!("Wrote result to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| !r.result.is_passed()).collect();
    let passed = results.len() - failed.len();

    println!();
    println!(
        "{} Validated {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} passed, {} failed",
        style(passed).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for file in &failed {
            println!("  - {}:", file.path.display());
            for error in file.result.errors() {
                println!("      {}: {}", error.kind, error.message);
            }
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn validate_file(path: PathBuf, pipeline: &DeedPipeline<Box<dyn DeedExtractor>>) -> FileResult {
    let start = Instant::now();

    let result = match fs::read_to_string(&path) {
        Ok(text) => pipeline.validate_document(&text),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            ValidationResult::failed(vec![ValidationError::new(
                ErrorKind::Unexpected,
                format!("failed to read {}: {}", path.display(), e),
            )])
        }
    };

    FileResult {
        path,
        result,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Per-file result names, built from each path relative to the deepest
/// directory shared by all inputs ("a/deed.txt" -> "a_deed.json").
fn output_names(files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    let base = common_parent(files);
    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut names = Vec::with_capacity(files.len());

    for path in files {
        let relative = path.strip_prefix(&base).unwrap_or(path).with_extension("");
        let stem = relative
            .iter()
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join("_");
        let name = format!("{}.json", stem);

        if let Some(previous) = seen.insert(name.clone(), path) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                path.display(),
                name
            );
        }
        names.push(name);
    }

    Ok(names)
}

fn common_parent(files: &[PathBuf]) -> PathBuf {
    let mut base = files
        .first()
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();

    while !files.iter().all(|p| p.starts_with(&base)) {
        if !base.pop() {
            break;
        }
    }
    base
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "doc",
        "county",
        "match_confidence",
        "amount",
        "tax_rate",
        "closing_cost",
        "processing_time_ms",
        "errors",
    ])?;

    for file in results {
        let filename = file.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        match (file.result.deed(), file.result.closing_cost()) {
            (Some(deed), Some(closing_cost)) => {
                wtr.write_record([
                    filename,
                    "passed",
                    &deed.extracted.doc,
                    &deed.county_canonical,
                    &format!("{:.3}", deed.match_confidence),
                    &format_money(deed.extracted.amount_numeric),
                    &deed.tax_rate.to_string(),
                    &format_money(closing_cost),
                    &file.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            _ => {
                let errors = file
                    .result
                    .errors()
                    .iter()
                    .map(|e| e.kind.as_str())
                    .collect::<Vec<_>>()
                    .join(";");
                wtr.write_record([
                    filename,
                    "failed",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &file.processing_time_ms.to_string(),
                    &errors,
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
