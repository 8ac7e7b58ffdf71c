//! CLI module for xspf-export

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "xspf-export",
    about = "Export a playlist library to XSPF files, keeping its folders"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every playlist in a container snapshot
    Export {
        /// Container snapshot (JSON array of entries), or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination directory (default: configured destination, else current)
        #[arg(short, long, env = "XSPF_EXPORT_DEST")]
        dest: Option<PathBuf>,

        /// Do not make directories for playlist folders
        #[arg(short, long, conflicts_with = "folders")]
        flat: bool,

        /// Make directories for playlist folders, even if flat export is configured
        #[arg(long)]
        folders: bool,

        /// Show where playlists would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the folder hierarchy of a container snapshot
    Tree {
        /// Container snapshot (JSON array of entries), or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Summarize an exported XSPF file
    Show {
        /// Path to an .xspf file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show or change stored export defaults
    Config {
        /// Default destination directory
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Default for flat export
        #[arg(long)]
        flat: Option<bool>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
