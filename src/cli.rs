use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Schema-driven form engine: render, validate and submit form documents
#[derive(Parser, Debug, Clone)]
#[command(name = "studio-forms", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "STUDIO_CONFIG", default_value = "studio.toml")]
    pub config: PathBuf,

    /// Output format (text or json)
    #[arg(long, env = "STUDIO_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Nesting depth at which composition stops
    #[arg(long, env = "STUDIO_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// maxLength above which string fields get a multi-line editor
    #[arg(long, env = "STUDIO_MULTILINE_THRESHOLD")]
    pub multiline_threshold: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a document as a control tree
    Render {
        /// Document file (json, yaml or toml)
        document: PathBuf,
        /// Values file replacing the document's embedded values
        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// Print the value a fresh instance of the document's schema starts with
    Blueprint { document: PathBuf },
    /// Evaluate validation rules; exits non-zero when any field fails
    Validate {
        document: PathBuf,
        #[arg(long)]
        values: Option<PathBuf>,
        /// Server-side error payload to merge after validating
        #[arg(long)]
        errors: Option<PathBuf>,
    },
    /// Build the payload for a named transition
    Submit {
        document: PathBuf,
        /// Transition name
        #[arg(short, long)]
        transition: String,
        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// Append a default element to an array and print the new values
    Append {
        document: PathBuf,
        /// Dotted path of the array (empty for a root array)
        #[arg(short, long, default_value = "")]
        path: String,
        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// Remove an array element and print the new values
    Remove {
        document: PathBuf,
        #[arg(short, long, default_value = "")]
        path: String,
        /// Zero-based element index
        #[arg(short, long)]
        index: usize,
        #[arg(long)]
        values: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["studio-forms", "render", "doc.json"]);
        assert_eq!(cli.config, PathBuf::from("studio.toml"));
        assert!(cli.format.is_none());
        assert!(cli.max_depth.is_none());
        match cli.command {
            Command::Render { document, values } => {
                assert_eq!(document, PathBuf::from("doc.json"));
                assert!(values.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "studio-forms",
            "--config",
            "custom.toml",
            "--format",
            "json",
            "--max-depth",
            "8",
            "--multiline-threshold",
            "40",
            "submit",
            "doc.yaml",
            "--transition",
            "approve",
            "--values",
            "values.json",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.max_depth, Some(8));
        assert_eq!(cli.multiline_threshold, Some(40));
        match cli.command {
            Command::Submit { transition, values, .. } => {
                assert_eq!(transition, "approve");
                assert_eq!(values, Some(PathBuf::from("values.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_remove_requires_index() {
        assert!(Cli::try_parse_from(["studio-forms", "remove", "doc.json", "--path", "tags"]).is_err());

        let cli = Cli::parse_from(["studio-forms", "remove", "doc.json", "-p", "tags", "-i", "2"]);
        assert!(matches!(cli.command, Command::Remove { index: 2, .. }));
    }
}
