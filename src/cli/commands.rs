//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for IBM Cloud support cases
#[derive(Parser, Debug)]
#[command(name = "case-management")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service URL (overrides external configuration)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cases
    List {
        /// Status filter (comma-separated, e.g. new,in_progress)
        #[arg(long, value_delimiter = ',')]
        status: Vec<String>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Sort field, prefix with ~ for descending
        #[arg(long)]
        sort: Option<String>,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Page size
        #[arg(long)]
        limit: Option<i64>,

        /// Fetch every page instead of only the first
        #[arg(long)]
        all: bool,
    },

    /// Show one case
    Get {
        /// Case number
        case_number: String,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Comment on a case
    Comment {
        /// Case number
        case_number: String,

        /// Comment text
        text: String,
    },

    /// Resolve a case
    Resolve {
        /// Case number
        case_number: String,

        /// Resolution code (1-8)
        #[arg(long)]
        code: i64,

        /// Resolution comment
        #[arg(long)]
        comment: Option<String>,
    },

    /// Reopen a resolved case
    Unresolve {
        /// Case number
        case_number: String,

        /// Why the case is reopened
        comment: String,
    },

    /// Accept the proposed resolution
    Accept {
        /// Case number
        case_number: String,

        /// Comment on the resolution
        #[arg(long)]
        comment: Option<String>,
    },

    /// Download an attachment
    Download {
        /// Case number
        case_number: String,

        /// Attachment id
        file_id: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Get { .. } => "get",
            Self::Comment { .. } => "comment",
            Self::Resolve { .. } => "resolve",
            Self::Unresolve { .. } => "unresolve",
            Self::Accept { .. } => "accept",
            Self::Download { .. } => "download",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "case-management",
            "--format",
            "json",
            "list",
            "--status",
            "new,in_progress",
            "--limit",
            "25",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::List {
                status, limit, all, ..
            } => {
                assert_eq!(status, vec!["new", "in_progress"]);
                assert_eq!(limit, Some(25));
                assert!(all);
            }
            other => panic!("Expected List, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_resolve_requires_code() {
        assert!(Cli::try_parse_from(["case-management", "resolve", "CS1"]).is_err());

        let cli =
            Cli::try_parse_from(["case-management", "resolve", "CS1", "--code", "6"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { code: 6, .. }));
        assert_eq!(cli.command.name(), "resolve");
    }

    #[test]
    fn test_global_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "case-management",
            "get",
            "CS1",
            "--url",
            "http://localhost:9000/v1",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost:9000/v1"));
    }
}
