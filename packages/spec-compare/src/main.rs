// Entry point for the spec sheet comparison run

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gemini_client::GeminiClient;
use spec_compare::{Config, GeminiInference, Pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "spec-compare", version, about = "Compare product spec sheets with Gemini")]
struct Cli {
    /// Directory of PDF spec sheets (overrides SPEC_INPUT_DIR)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Where to write the extracted records (overrides SPEC_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Gemini model name (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,spec_compare=debug,gemini_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.input_dir {
        config = config.with_input_dir(dir);
    }
    if let Some(path) = cli.output {
        config = config.with_output_path(path);
    }
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    tracing::info!(model = %config.model, input_dir = %config.input_dir.display(), "Configuration loaded");

    let mut client = GeminiClient::new(&config.api_key);
    if let Some(url) = &config.base_url {
        client = client.with_base_url(url);
    }
    let inference = GeminiInference::new(client, &config.model);

    println!();
    println!("{}", "GEMINI MULTIMODAL DEMO - SPEC SHEET COMPARISON".bright_cyan().bold());
    println!();

    let mut stdout = std::io::stdout().lock();
    let outcome = Pipeline::new(config, inference)
        .run(&mut stdout)
        .await
        .context("Spec comparison failed")?;

    if !outcome.skipped.is_empty() {
        eprintln!(
            "{}",
            format!("{} spec sheet(s) skipped", outcome.skipped.len()).bright_yellow()
        );
    }

    Ok(())
}
