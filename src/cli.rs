//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::ranking::is_valid_persistence;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List Jiggler - shareable, sortable lists that live in a URL
///
/// Create a list, reorder it, share the link, then compare everyone's
/// orderings to get a consensus ranking based on Rank-Biased Overlap.
///
/// Examples:
///   listjiggler create --title "Best films" --item Alien --item Heat --item Ran
///   listjiggler move https://listjiggler.com/list/eyJ0... --from 3 --to 1
///   listjiggler compare LINK_A LINK_B LINK_C --format csv --output rankings.csv
///   listjiggler preview https://listjiggler.com/list/eyJ0... --oembed
///   listjiggler init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .listjiggler.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Origin that share links are built under
    #[arg(long, global = true, value_name = "URL", env = "LISTJIGGLER_BASE_URL")]
    pub base_url: Option<String>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a list and print its share link
    Create {
        /// List title (defaults to the configured default title)
        #[arg(short, long)]
        title: Option<String>,

        /// Add one item (repeatable)
        #[arg(short = 'i', long = "item", value_name = "ITEM")]
        items: Vec<String>,

        /// Add several items: comma-separated (quote items containing
        /// commas) or one per line
        #[arg(long, value_name = "TEXT")]
        bulk: Option<String>,

        /// Read bulk items from a file
        #[arg(long, value_name = "FILE")]
        bulk_file: Option<PathBuf>,
    },

    /// Decode and print a shared list
    Show {
        /// Share link or bare token
        link: String,

        /// Output format
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: ListFormat,
    },

    /// Move one item and print the new share link
    Move {
        /// Share link or bare token
        link: String,

        /// Current position of the item (1-based)
        #[arg(long, value_name = "POS")]
        from: usize,

        /// New position of the item (1-based)
        #[arg(long, value_name = "POS")]
        to: usize,
    },

    /// Compare several lists and print the consensus ranking
    Compare {
        /// Share links or bare tokens
        links: Vec<String>,

        /// Read links from a file, one per line
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Title for the consensus list
        #[arg(short, long)]
        title: Option<String>,

        /// Output format (text, markdown, json, csv)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// RBO persistence, strictly between 0 and 1
        #[arg(short, long, value_name = "P")]
        persistence: Option<f64>,
    },

    /// Score how closely two lists agree (Rank-Biased Overlap)
    Score {
        /// First share link or token
        first: String,

        /// Second share link or token
        second: String,

        /// RBO persistence, strictly between 0 and 1
        #[arg(short, long, value_name = "P")]
        persistence: Option<f64>,
    },

    /// Print link-preview metadata for a shared list
    Preview {
        /// Share link or bare token
        link: String,

        /// Print an oEmbed JSON document instead of a text summary
        #[arg(long)]
        oembed: bool,
    },

    /// Generate a default .listjiggler.toml configuration file
    InitConfig,
}

impl Command {
    /// Persistence given on the command line, if the command takes one.
    pub fn persistence(&self) -> Option<f64> {
        match self {
            Command::Compare { persistence, .. } | Command::Score { persistence, .. } => {
                *persistence
            }
            _ => None,
        }
    }
}

/// Output format for a single list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListFormat {
    /// Numbered lines (default)
    #[default]
    Text,
    /// The decoded payload as JSON
    Json,
}

/// Output format for a comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Aligned table (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
    /// CSV: item, consensus rank, per-list ranks
    Csv,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(p) = self.command.persistence() {
            if !is_valid_persistence(p) {
                return Err(format!(
                    "Persistence must be strictly between 0 and 1, got {}",
                    p
                ));
            }
        }

        match &self.command {
            Command::Create {
                items,
                bulk,
                bulk_file,
                ..
            } => {
                if items.is_empty() && bulk.is_none() && bulk_file.is_none() {
                    return Err("Add at least one item with --item, --bulk or --bulk-file"
                        .to_string());
                }
                if let Some(ref path) = bulk_file {
                    if !path.is_file() {
                        return Err(format!("Bulk file does not exist: {}", path.display()));
                    }
                }
            }
            Command::Move { from, to, .. } => {
                if *from == 0 || *to == 0 {
                    return Err("Positions start at 1".to_string());
                }
            }
            Command::Compare { links, input, .. } => {
                if links.is_empty() && input.is_none() {
                    return Err("Provide links to compare or --input FILE".to_string());
                }
                if let Some(ref path) = input {
                    if !path.is_file() {
                        return Err(format!("Input file does not exist: {}", path.display()));
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("listjiggler").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_create() {
        let args = parse(&["create", "-t", "Films", "-i", "Alien", "--item", "Heat"]);
        match args.command {
            Command::Create { title, items, .. } => {
                assert_eq!(title.as_deref(), Some("Films"));
                assert_eq!(items, vec!["Alien", "Heat"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_compare_with_global_flags() {
        let args = parse(&["compare", "A", "B", "--format", "csv", "-p", "0.8", "-v"]);
        assert!(args.verbose);
        assert_eq!(args.command.persistence(), Some(0.8));
        match args.command {
            Command::Compare { links, format, .. } => {
                assert_eq!(links, vec!["A", "B"]);
                assert_eq!(format, ReportFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validation_create_needs_items() {
        let args = parse(&["create", "--title", "Empty"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_move_positions_are_one_based() {
        let args = parse(&["move", "abc", "--from", "0", "--to", "1"]);
        assert!(args.validate().is_err());

        let args = parse(&["move", "abc", "--from", "2", "--to", "1"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_persistence_range() {
        let args = parse(&["score", "a", "b", "--persistence", "1.0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let args = parse(&["show", "abc", "--verbose", "--quiet"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_base_url() {
        let args = parse(&["show", "abc", "--base-url", "ftp://nope"]);
        assert!(args.validate().is_err());
    }
}
