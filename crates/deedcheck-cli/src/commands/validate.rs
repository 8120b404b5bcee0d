//! Validate command - check a single deed document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use deedcheck_core::models::config::DeedCheckConfig;
use deedcheck_core::rules::{days_between, format_money};
use deedcheck_core::{DeedPipeline, ValidationResult};

use super::{load_config, load_reference, ExtractorKind, RuleOverrides};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Input file with OCR text, or "-" for stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// How to read deed fields from the input
    #[arg(short, long, value_enum, default_value = "labeled")]
    extractor: ExtractorKind,

    #[command(flatten)]
    overrides: RuleOverrides,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config);
    config.validate()?;

    let counties = load_reference(&config)?;
    let raw_text = read_input(&args.input)?;
    info!("Validating {}", args.input);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Validating deed...");

    let pipeline = DeedPipeline::new(args.extractor.build(), counties, &config.validation);
    let result = pipeline.validate_document(&raw_text);

    pb.finish_and_clear();

    let output = format_result(&result, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(if result.is_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read_to_string(&path)?)
}

pub fn format_result(
    result: &ValidationResult,
    format: OutputFormat,
    config: &DeedCheckConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.output.pretty_json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ValidationResult) -> String {
    let mut output = String::new();

    match (result.deed(), result.closing_cost()) {
        (Some(deed), Some(closing_cost)) => {
            output.push_str("STATUS: PASS\n\n");
            output.push_str(&format!("Document: {}\n", deed.extracted.doc));
            output.push_str(&format!(
                "County: {} (from '{}', confidence {:.1}%)\n",
                deed.county_canonical,
                deed.extracted.county_raw,
                deed.match_confidence * 100.0
            ));
            if let Ok(days) = days_between(&deed.extracted.date_signed, &deed.extracted.date_recorded) {
                output.push_str(&format!("Recorded: {} days after signing\n", days));
            }
            output.push_str(&format!(
                "Transaction Amount: {}\n",
                format_money(deed.extracted.amount_numeric)
            ));
            output.push_str(&format!(
                "Tax Rate: {:.1}%\n",
                deed.tax_rate * rust_decimal::Decimal::ONE_HUNDRED
            ));
            output.push_str(&format!("Closing Cost: {}\n", format_money(closing_cost)));
        }
        _ => {
            output.push_str("STATUS: FAIL\n\n");
            output.push_str("Errors:\n");
            for error in result.errors() {
                output.push_str(&format!("  - {}: {}\n", error.kind, error.message));
            }
        }
    }

    output
}
