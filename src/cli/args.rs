//! Command-line argument parsing for the catalog client
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Catalog Client - browse a published content catalog
#[derive(Parser, Debug)]
#[command(
    name = "catalog_client",
    version,
    about = "Browse a published content catalog and fetch content with translations",
    long_about = "Loads a remote content index, answers search and listing queries against it,
and fetches individual content bodies together with whatever translations are available."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level implied by the verbosity flags, if any was given
    pub fn log_level(&self) -> Option<&'static str> {
        if self.global.very_verbose {
            Some("debug")
        } else if self.global.verbose {
            Some("info")
        } else if self.global.quiet {
            Some("error")
        } else {
            None
        }
    }
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog base URL (overrides config and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the catalog index and show a summary
    Index,

    /// List every item in the catalog
    List,

    /// Search titles, authors, and categories (empty query lists everything)
    Search {
        /// Case-insensitive search text
        #[arg(default_value = "")]
        query: String,
    },

    /// List items in one category (exact match)
    Category {
        /// Category name
        name: String,
    },

    /// List featured items
    Featured,

    /// List popular items
    Popular,

    /// List recently added items
    Recent,

    /// Fetch and show one content item
    Show(ShowArgs),

    /// Fetch one translation
    Translation {
        /// Content id
        id: String,
        /// Language code
        language: String,
    },

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the show command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Content id
    pub id: String,

    /// Also fetch every available translation
    #[arg(short, long)]
    pub translations: bool,

    /// Fetch translations concurrently instead of one at a time
    #[arg(long, requires = "translations")]
    pub concurrent: bool,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file if none exists
    Init {
        /// Target path (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}
