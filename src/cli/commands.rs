use clap::{Parser, Subcommand, ValueEnum};

use crate::diff::DiffAlgorithm;

#[derive(Parser)]
#[command(
    name = "doccheck",
    version,
    about = "Document comparison and contract compliance checking",
    after_help = "Settings are read from .doccheck/config.toml in the working directory. \
                  Log verbosity follows RUST_LOG; logs go to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents and highlight what changed.
    ///
    /// Accepts .pdf, .docx, .txt and .md files in any combination.
    /// A file that cannot be read is compared as empty text and reported
    /// in the `warnings` field.
    Diff {
        /// Old version
        old: String,
        /// New version
        new: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DiffFormat::Json)]
        format: DiffFormat,
        /// Alignment algorithm (default: [diff].algorithm from config)
        #[arg(short, long, value_enum)]
        algorithm: Option<DiffAlgorithm>,
    },

    /// Check a contract against one or more regulations.
    ///
    /// Each regulation is sent to the chat-completion endpoint together with
    /// the contract text. Regulations that are not .pdf or .docx are skipped.
    /// Ctrl-C stops the batch and prints the reports gathered so far.
    Check {
        /// Contract (.docx)
        #[arg(short, long)]
        contract: String,
        /// Regulation file (repeatable)
        #[arg(short, long = "regulation", num_args = 1..)]
        regulations: Vec<String>,
        /// API key for the chat-completion endpoint
        #[arg(long, env = "DOCCHECK_API_KEY", hide_env_values = true, default_value = "")]
        api_key: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
        /// Override [compliance].endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Override [compliance].model
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the text extracted from a document
    Extract {
        /// Document path
        path: String,
    },

    /// List accepted file types per tool
    Formats,
}

/// Output of `doccheck diff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// Report with both views and statistics
    Json,
    /// Standalone two-column HTML page
    Html,
}

/// Output of `doccheck check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Markdown,
}
