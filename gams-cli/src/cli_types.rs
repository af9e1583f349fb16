//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gams")]
#[command(about = "Manage the game list of a Gams site", long_about = None)]
pub(crate) struct Cli {
    /// Site root containing the host document (defaults to config, then current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Command to run; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Download a game from the remote index and add it to a section
    Add {
        /// Index id, with or without its prefix (e.g. clDriveMad or DriveMad)
        id: String,

        /// Display name (derived from the id when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Section to append to (defaults to the configured default section)
        section: Option<String>,

        /// Don't generate a thumbnail; one will be supplied with assign-image
        #[arg(long)]
        custom_image: bool,
    },

    /// Search the remote index by name
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// Browse the remote index by first letter
    Browse {
        /// Letter to list; prints the available letters when omitted
        letter: Option<char>,
    },

    /// Remove a game from the list and delete its files
    Delete {
        /// Exact display name
        name: String,

        /// Remove the entry but leave game files and thumbnail on disk
        #[arg(long)]
        keep_files: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Report games listed more than once
    Duplicates {
        /// Remove every duplicate except the first occurrence
        #[arg(long)]
        prune: bool,
    },

    /// Report game files and thumbnails no game references
    Orphans {
        /// Delete what was found
        #[arg(long)]
        delete: bool,
    },

    /// List all sections and games
    List,

    /// List section titles
    Sections,

    /// Append a new, empty section
    NewSection {
        title: String,
    },

    /// Replace a game's thumbnail
    AssignImage {
        /// Exact display name
        name: String,

        /// Download the image from this URL instead of using the default logo
        #[arg(long)]
        url: Option<String>,
    },

    /// Copy the host document to a timestamped backup
    Backup,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show effective settings and where the site root came from
    Show,

    /// Write the effective settings to the settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
