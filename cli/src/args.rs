//! CLI argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for workflow results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every model's answer
    Full,
    /// Only the consolidated answer
    Consolidated,
    /// JSON output
    Json,
}

/// CLI arguments for model-chorus
#[derive(Parser, Debug)]
#[command(name = "model-chorus")]
#[command(author, version, about = "Fan a prompt out to multiple LLMs and consolidate their answers")]
#[command(long_about = r#"
model-chorus sends one prompt to several model backends in parallel,
tolerates individual failures, and has a designated consolidator model
synthesize the collected answers into a single response.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./chorus.toml       Project-level config
3. ~/.config/model-chorus/config.toml   Global config

API keys are read from ANTHROPIC_API_KEY and OPENAI_API_KEY.

Example:
  model-chorus "What's the best way to handle errors in Rust?"
  model-chorus -m claude-sonnet-4-5 -m gpt-5 "Compare async runtimes"
  model-chorus --consolidator gpt-5 -o json "Summarize RFC 9110"
"#)]
pub struct Cli {
    /// The prompt to fan out to the configured models
    pub prompt: Option<String>,

    /// Models to query (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model to use for the final consolidation
    #[arg(long, value_name = "MODEL")]
    pub consolidator: Option<String>,

    /// Sampling temperature for the fan-out queries
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f32>,

    /// Maximum output tokens for the fan-out queries
    #[arg(long, value_name = "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "consolidated")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
