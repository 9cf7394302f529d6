//! Command line argument parsing for the crmchat CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// crmchat - Query CRM data with natural language
#[derive(Parser, Debug, Clone)]
#[command(name = "crmchat")]
#[command(about = "A natural-language chat assistant for CRM data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ChatArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Directory containing companies.csv, contacts.csv, opportunities.csv
    #[arg(short, long, value_name = "DIR", env = "CRMCHAT_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Minimum cosine similarity for a template match to be accepted
    #[arg(long, value_name = "SCORE", default_value_t = 0.3)]
    pub similarity_threshold: f32,

    /// Score (0-100) a fuzzy company match must strictly exceed
    #[arg(long, value_name = "SCORE", default_value_t = 70.0)]
    pub fuzzy_threshold: f64,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ChatArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive chat session
    Chat,

    /// Ask a single question and exit
    Ask(AskArgs),
}

/// Arguments for a one-shot question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question to ask
    #[arg(value_name = "QUESTION")]
    pub question: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
