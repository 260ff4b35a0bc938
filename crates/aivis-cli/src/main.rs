mod brand;
mod commands;
mod input;
mod provider;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aivis")]
#[command(about = "Brand visibility extraction and scoring for AI answers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract visibility signals from a single answer text
    Analyze {
        /// Brand to look for
        #[arg(long)]
        brand: String,

        /// File holding the answer text; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Score a batch of answers
    Score {
        #[arg(long)]
        brand: String,

        /// JSON array of answers (`query`, `model`, `response`, optional `category`)
        #[arg(long)]
        input: PathBuf,

        /// Add a per-model breakdown
        #[arg(long)]
        by_model: bool,

        /// Add a per-category breakdown
        #[arg(long)]
        by_category: bool,
    },
    /// Score a batch and run the full analytics suite
    Report {
        #[arg(long)]
        brand: String,

        /// Industry label; defaults to the brand profile's industry
        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        input: PathBuf,
    },
    /// Predict the score after a set of brand changes
    Simulate {
        #[arg(long)]
        brand: String,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        input: PathBuf,

        /// JSON object of proposed changes (`tagline`, `features`, `keywords`,
        /// `pages`, `pricing_strategy`)
        #[arg(long)]
        changes: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = aivis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Analyze { brand, file } => {
            commands::run_analyze(&config, &brand, file.as_deref())?
        }
        Commands::Score {
            brand,
            input,
            by_model,
            by_category,
        } => commands::run_score(&config, &brand, &input, by_model, by_category)?,
        Commands::Report {
            brand,
            industry,
            input,
        } => commands::run_report(&config, &brand, industry.as_deref(), &input).await?,
        Commands::Simulate {
            brand,
            industry,
            input,
            changes,
        } => {
            commands::run_simulate(&config, &brand, industry.as_deref(), &input, &changes).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests;
