#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use domain::{Bar, MacroReading, MacroSnapshot, PriceSeries, SeriesTrend};
pub use engine::{Engine, EngineConfig, evaluate_asset, evaluate_batch};
pub use models::AssetEvaluation;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON batch file: { "assets": [{ "symbol", "bars" }], "macro": { id: { current, previous, trend } } }
    #[arg(long)]
    pub input: std::path::PathBuf,

    /// Emit full result records as JSON instead of the summary table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only evaluate these symbols (repeatable)
    #[arg(long = "asset", value_name = "SYMBOL")]
    pub assets: Vec<String>,
}

/// Loads the batch, evaluates every asset in parallel and prints the result.
/// This is the public API for the binary to call
pub fn run_cli(args: Cli) -> anyhow::Result<()> {
    let mut batch = report::BatchInput::load(&args.input)?;
    batch.retain_symbols(&args.assets);
    if batch.assets.is_empty() {
        anyhow::bail!("No assets to evaluate in {}", args.input.display());
    }

    let evaluations = evaluate_batch(&batch.assets, std::sync::Arc::new(batch.macro_data));

    if args.json {
        println!("{}", report::render_json(&evaluations)?);
    } else {
        let mut reporter = report::SummaryReporter::new();
        for evaluation in &evaluations {
            reporter.add_row(evaluation);
        }
        reporter.print_all();
    }
    Ok(())
}
