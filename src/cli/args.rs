//! Command line argument parsing for the Palaver CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::token_filter::ReductionMode;

/// Palaver - a rule-based conversational responder
#[derive(Parser, Debug, Clone)]
#[command(name = "palaver")]
#[command(about = "A rule-based conversational responder with a keyword intent classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PalaverArgs {
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

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PalaverArgs {
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
    /// Start an interactive conversation on stdin/stdout
    Chat(ChatArgs),

    /// Classify one or more utterances
    Classify(ClassifyArgs),

    /// Show how an utterance is normalized
    Normalize(NormalizeArgs),
}

/// Options shared by every command that builds a responder
#[derive(Parser, Debug, Clone, Default)]
pub struct ResponderArgs {
    /// Responder configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "PALAVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the root reduction mode
    #[arg(long)]
    pub reduction: Option<ReductionArg>,
}

/// Arguments for an interactive session
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub responder: ResponderArgs,

    /// Seed for reply selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delegate replies to this command (utterance on stdin, reply on stdout)
    #[arg(long, value_name = "COMMAND", env = "PALAVER_GENERATOR_CMD")]
    pub generator_cmd: Option<String>,

    /// Generator timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub responder: ResponderArgs,

    /// Utterances to classify
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,

    /// Show per-intent trigger counts
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for normalization
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub responder: ResponderArgs,

    /// Utterance to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Root reduction modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionArg {
    /// Porter stemmer
    Stem,
    /// Dictionary lemmatizer
    Lemma,
    /// No reduction
    None,
}

impl From<ReductionArg> for ReductionMode {
    fn from(arg: ReductionArg) -> Self {
        match arg {
            ReductionArg::Stem => ReductionMode::Stem,
            ReductionArg::Lemma => ReductionMode::Lemma,
            ReductionArg::None => ReductionMode::None,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
