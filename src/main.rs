//! # pagelift CLI Application
//!
//! Command-line interface for the product-page extraction pipeline.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for the pipeline stages:
//!   - `extract`: Run the full batch extraction over a directory of pages
//!   - `stats`: Report per-page token reduction without calling the model
//!
//! ## Features
//!
//! - Configurable concurrency and output destinations
//! - Progress indication for long-running batches
//! - Token usage and cost summary after each run

use clap::{Args, CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pagelift::extract::Extractor;
use pagelift::gemini::Client;
use pagelift::pipeline::{Pipeline, PipelineConfig, write_records};
use pagelift::preprocess::{estimate_tokens, preprocess};
use pagelift::taxonomy::Taxonomy;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Extract structured product records from saved product pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract product records from a directory of pages
    Extract(ExtractArgs),

    /// Report per-page token reduction without calling the model
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Directory holding the saved product pages
    #[arg(short, long, default_value = "data")]
    input: PathBuf,

    /// Output file(s) for the extracted records (repeatable)
    #[arg(short, long, default_value = "products.json")]
    output: Vec<PathBuf>,

    /// Category taxonomy file
    #[arg(short, long, default_value = "categories.txt")]
    taxonomy: PathBuf,

    /// Model to use for extraction
    #[arg(short, long, default_value = "gemini-2.0-flash-lite")]
    model: String,

    /// Number of pages processed concurrently
    #[arg(short, long, default_value = "4")]
    concurrency: usize,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Directory holding the saved product pages
    #[arg(short, long, default_value = "data")]
    input: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract(args)) => {
            extract_command(args).await?;
        }
        Some(Commands::Stats(args)) => {
            stats_command(args)?;
        }
        None => {
            // If no command is provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

#[instrument(skip(args))]
async fn extract_command(args: ExtractArgs) -> anyhow::Result<()> {
    let client = Client::from_env()?;
    let taxonomy = Arc::new(Taxonomy::load(&args.taxonomy)?);
    println!(
        "Loaded {} taxonomy entries from {}",
        taxonomy.len(),
        args.taxonomy.display()
    );

    let config = PipelineConfig::builder()
        .input_dir(args.input)
        .outputs(args.output.clone())
        .taxonomy_path(args.taxonomy)
        .model(&args.model)
        .concurrency(args.concurrency)
        .build();

    let extractor = Extractor::new(client, &args.model);
    let pipeline = Pipeline::new(extractor, taxonomy, config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Extracting with {}...", args.model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = pipeline.run().await?;
    spinner.finish_with_message("Extraction complete");

    write_records(&report.records, &args.output)?;
    for output in &args.output {
        println!("Saved {} records to {}", report.records.len(), output.display());
    }

    println!("\n--- Token Usage ---");
    println!("Documents processed: {}", report.total());
    println!("Succeeded: {}", report.succeeded);
    println!("Failed: {}", report.failed);
    println!("Total tokens consumed: ~{}", report.estimated_tokens);
    println!("Estimated cost: ${:.4}", report.estimated_cost());

    Ok(())
}

#[instrument(skip(args))]
fn stats_command(args: StatsArgs) -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(&args.input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("html"))
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No .html files found in {}", args.input.display());
        return Ok(());
    }

    println!("{:<40} {:>12} {:>12} {:>10}", "File", "Raw tokens", "Processed", "Saved");

    let mut total_raw = 0usize;
    let mut total_processed = 0usize;
    for path in &files {
        let markup = std::fs::read_to_string(path)?;
        let raw_tokens = estimate_tokens(&markup);
        let payload = preprocess(&markup)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let saved = raw_tokens.saturating_sub(payload.estimated_tokens);
        println!(
            "{:<40} {:>12} {:>12} {:>10}",
            name, raw_tokens, payload.estimated_tokens, saved
        );

        total_raw += raw_tokens;
        total_processed += payload.estimated_tokens;
    }

    let reduction = if total_raw > 0 {
        100.0 * (total_raw - total_processed) as f64 / total_raw as f64
    } else {
        0.0
    };

    println!("\nTotal raw tokens:       ~{}", total_raw);
    println!("Total processed tokens: ~{}", total_processed);
    println!("Reduction:              {:.1}%", reduction);

    // Projection at catalog scale: average tokens per page times 50M
    // pages, priced at the input rate.
    let avg_tokens = total_processed as f64 / files.len() as f64;
    let projected_cost =
        avg_tokens * 50_000_000.0 / 1_000_000.0 * pagelift::pipeline::INPUT_PRICE_PER_MILLION;
    println!(
        "Projected input cost for 50M pages: ${:.2}",
        projected_cost
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses_and_help_renders() {
        let cli = Cli::parse_from(["pagelift"]);
        assert!(cli.command.is_none());

        let help = Cli::command().render_help().to_string();
        assert!(help.contains("extract"));
        assert!(help.contains("stats"));
    }
}
