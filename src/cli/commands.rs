//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagshift")]
#[command(about = "Rename hierarchical #tags across a markdown vault", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new vault
    Init {
        /// Vault root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// List all tags with their occurrence counts
    Tags,

    /// Rename a tag and all tags nested under it
    Rename {
        /// Tag to rename (with or without '#')
        from: String,

        /// New tag name
        to: String,

        /// Show what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Proceed even if the new name merges into an existing tag
        #[arg(long)]
        merge: bool,
    },
}
