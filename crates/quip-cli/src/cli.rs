use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quip")]
#[command(about = "Capture, filter, and sync memorable quotes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Category for quick capture
    #[arg(short, long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Quick capture: quip "my quote here" -c Category
    #[arg(trailing_var_arg = true)]
    pub quote: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new quote
    #[command(alias = "new")]
    Add {
        /// Quote text
        text: Vec<String>,
        /// Category label
        #[arg(short, long, value_name = "CATEGORY")]
        category: String,
        /// Run a sync cycle right after adding
        #[arg(long)]
        sync: bool,
    },
    /// Show a random quote from the filtered view
    Show {
        /// Ignore the saved category filter
        #[arg(long)]
        any: bool,
    },
    /// List quotes
    List {
        /// Show only this category
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,
        /// Number of quotes to show (0 shows all)
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories with quote counts
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show, set, or clear the saved category filter
    Filter {
        /// Category to filter by
        category: Option<String>,
        /// Clear the saved filter
        #[arg(long, conflicts_with = "category")]
        clear: bool,
    },
    /// Import quotes from a JSON file
    Import {
        /// Path to a JSON document
        path: PathBuf,
        /// Run a sync cycle right after importing
        #[arg(long)]
        sync: bool,
    },
    /// Export the collection as JSON
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Run one sync cycle against the remote feed
    Sync {
        /// Output the cycle report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sync periodically until interrupted
    Watch {
        /// Seconds between cycles
        #[arg(short, long, default_value = "60")]
        interval: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
