//! Counties command - inspect the reference table and diagnose matches.

use std::process::ExitCode;

use clap::{Args, Subcommand};
use console::style;
use rust_decimal::Decimal;

use deedcheck_core::resolve_county;
use deedcheck_core::text::{expand_abbreviations, normalize};

use super::{load_config, load_reference, RuleOverrides};

/// Arguments for the counties command.
#[derive(Args)]
pub struct CountiesArgs {
    #[command(subcommand)]
    command: CountiesCommand,

    #[command(flatten)]
    overrides: RuleOverrides,
}

#[derive(Subcommand)]
enum CountiesCommand {
    /// List reference counties and their tax rates
    List,

    /// Show how a raw county name resolves
    Resolve {
        /// Raw county name as it appears on the document
        name: String,
    },
}

pub async fn run(args: CountiesArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let mut config = load_config(config_path)?;
    args.overrides.apply(&mut config);
    config.validate()?;

    let counties = load_reference(&config)?;

    match args.command {
        CountiesCommand::List => {
            for county in &counties {
                println!(
                    "{:<20} {:>6.2}%",
                    county.name,
                    county.tax_rate * Decimal::ONE_HUNDRED
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        CountiesCommand::Resolve { name } => {
            let threshold = config.validation.county_match_threshold;
            println!("Input:      '{}'", name);
            println!("Normalized: '{}'", normalize(&name));
            println!("Expanded:   '{}'", expand_abbreviations(&name));

            match resolve_county(&name, &counties, threshold) {
                Ok(matched) => {
                    println!(
                        "{} {} (tax rate {}, confidence {:.1}%)",
                        style("✓").green(),
                        matched.name,
                        matched.tax_rate,
                        matched.confidence * 100.0
                    );
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    println!("{} {}", style("✗").red(), err);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
