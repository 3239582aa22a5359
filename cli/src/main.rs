//! CLI entrypoint for model-chorus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;
mod progress;

use anyhow::{Context, Result, bail};
use args::{Cli, OutputFormat};
use chorus_application::ports::model_client::ModelClient;
use chorus_application::{RunWorkflowInput, RunWorkflowUseCase};
use chorus_domain::{Model, Prompt};
use chorus_infrastructure::{ConfigLoader, build_client};
use clap::Parser;
use output::ConsoleFormatter;
use progress::ProgressReporter;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let prompt = match cli.prompt.and_then(Prompt::try_new) {
        Some(p) => p,
        None => bail!("A non-empty prompt is required."),
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    // CLI flags override the config file
    let models: Vec<Model> = if cli.model.is_empty() {
        config.models()
    } else {
        cli.model.iter().map(|s| s.parse().unwrap()).collect()
    };

    let consolidator_model: Model = match &cli.consolidator {
        Some(s) => s.parse().unwrap(),
        None => config.chorus.consolidator.clone(),
    };

    let mut params = config.query_params();
    if let Some(temperature) = cli.temperature {
        params = params.with_temperature(temperature);
    }
    if let Some(max_tokens) = cli.max_tokens {
        params = params.with_max_tokens(max_tokens);
    }

    info!("Starting model-chorus");

    // === Dependency Injection ===
    let clients: Vec<Arc<dyn ModelClient>> = models
        .iter()
        .map(|m| build_client(m).with_context(|| format!("Failed to build client for {m}")))
        .collect::<Result<_>>()?;

    let consolidator = build_client(&consolidator_model)
        .with_context(|| format!("Failed to build consolidator client for {consolidator_model}"))?;

    if !cli.quiet {
        println!();
        println!("Prompt: {prompt}");
        println!(
            "Models: {} (consolidator: {})",
            models
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            consolidator_model
        );
        println!();
    }

    let use_case = RunWorkflowUseCase::new(clients, consolidator);
    let input = RunWorkflowInput::new(prompt).with_params(params);

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Consolidated => ConsoleFormatter::format_consolidated_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{rendered}");

    Ok(())
}
