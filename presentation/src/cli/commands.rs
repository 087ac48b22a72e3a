//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for workflow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sub-questions, their answers and the final answer
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Parse the config file spelling of a format
    pub fn from_config(s: &str) -> Option<Self> {
        match s {
            "full" => Some(OutputFormat::Full),
            "answer" => Some(OutputFormat::Answer),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// CLI arguments for subquery
#[derive(Parser, Debug)]
#[command(name = "subquery")]
#[command(author, version, about = "Decompose a question, answer each part with RAG, recombine")]
#[command(long_about = r#"
subquery answers a multi-entity question in three phases:
1. Decompose: an LLM splits the question into one sub-question per named entity
2. Answer: each sub-question is sent to the RAG backend (/invoke) with bounded retry
3. Synthesize: the question/answer pairs are recombined into one final answer

Configuration files are loaded from (in priority order):
1. SUBQUERY_<SECTION>__<KEY>   Environment variables
2. --config <path>             Explicit config file
3. ./subquery.toml             Project-level config
4. ~/.config/subquery/config.toml   Global config

Example:
  subquery "How did Bank A and Bank B do in 2023?"
  subquery -o json --concurrency 1 "Compare Bank A, Bank B and Bank C"
  cat questions.txt | subquery --stdin --direct
"#)]
pub struct Cli {
    /// The question to answer (omit with --stdin)
    pub question: Option<String>,

    /// Read questions from standard input, one per line
    #[arg(long)]
    pub stdin: bool,

    /// Skip decomposition and ask the RAG backend directly (/invoke, or /batch with --stdin)
    #[arg(long)]
    pub direct: bool,

    /// Output format (defaults to the config file setting, then "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Attempts per sub-question
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Sub-questions answered at the same time (1 = sequential)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append workflow events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub events_file: Option<PathBuf>,

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_flags() {
        let cli = Cli::try_parse_from([
            "subquery",
            "-o",
            "json",
            "--concurrency",
            "1",
            "-vv",
            "Bank A and Bank B?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("Bank A and Bank B?"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.concurrency, Some(1));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.stdin);
    }

    #[test]
    fn test_output_from_config() {
        assert_eq!(OutputFormat::from_config("full"), Some(OutputFormat::Full));
        assert_eq!(OutputFormat::from_config("xml"), None);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
