// src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docgen", version, about = "Generates PHPDoc blocks for PHP sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tag, generate and splice documentation for one PHP file or fragment
    Run(RunArgs),
    /// Print the documentable items of a file as JSON
    Map {
        /// PHP file or fragment to inspect
        input: PathBuf,
    },
    /// Re-apply a generated-docs map to a placeholder file
    Apply {
        /// File containing `{{doc_N}}` marker lines
        placeholder: PathBuf,
        /// JSON object mapping `doc_N` ids to documentation text
        docs: PathBuf,
        /// Write the result here instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// PHP file or fragment to document
    pub input: PathBuf,
    /// Output directory for all artifacts
    #[arg(long, short, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Artifact base name (defaults to the input file stem)
    #[arg(long)]
    pub base: Option<String>,
    /// Model name sent to the generation service
    #[arg(long)]
    pub model: Option<String>,
    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Skip the generation step even when an API key is set
    #[arg(long)]
    pub no_generate: bool,
    /// Replace existing doc comments with markers instead of adding new ones
    #[arg(long)]
    pub replace_existing: bool,
    /// Start a fresh events.jsonl instead of appending to it
    #[arg(long)]
    pub clean: bool,
    /// Suppress progress output
    #[arg(long, short)]
    pub quiet: bool,
}
