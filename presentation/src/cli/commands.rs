//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every stage
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON output
    Json,
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - a panel of models answers, ranks and synthesizes")]
#[command(long_about = r#"
LLM Council asks a panel of models the same question and combines their work.

The process has three stages:
1. Collect: every panel model answers your question in parallel
2. Rank: every panel model critiques and ranks the anonymized answers
3. Synthesize: a chairman model writes the final answer

Configuration is loaded from (in priority order):
1. LLM_COUNCIL_<SECTION>__<KEY>   Environment variables
2. --config <path>                Explicit config file
3. ./council.toml                 Project-level config
4. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council serve
  llm-council ask "What's the best way to handle errors in Rust?"
  llm-council ask -m openai/gpt-5.1 -m x-ai/grok-4 -o full "Compare async runtimes"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Keep conversations in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Ask the council one question from the terminal
    Ask {
        /// The question to ask the council
        question: String,

        /// Models to include in the panel (can be specified multiple times)
        #[arg(short, long, value_name = "MODEL")]
        model: Vec<String>,

        /// Model to use as chairman for the final synthesis
        #[arg(long, value_name = "MODEL")]
        chairman: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "synthesis")]
        output: OutputFormat,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show configuration sources and the effective configuration
    ShowConfig,
}
