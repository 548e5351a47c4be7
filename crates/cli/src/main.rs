//! TerraFlow CLI - agricultural suitability scoring pipeline

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use terraflow_pipeline::run_pipeline;

#[derive(Parser)]
#[command(name = "terraflow")]
#[command(author, version, about = "Geospatial agricultural suitability modeling", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the end-to-end suitability pipeline
    Run {
        /// Path to the YAML config file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run { config } => {
            let pb = spinner("Running pipeline...");
            let start = Instant::now();
            let records = run_pipeline(&config)
                .with_context(|| format!("pipeline failed for config {}", config.display()))?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            println!("Scored {} cells", records.len());
            println!("  Processing time: {:.2?}", elapsed);
        }
    }

    Ok(())
}
