//! Command-line interface for shiftflow.
//!
//! `serve` runs the HTTP API; the remaining commands administer staff and
//! locations directly against the database.

mod commands;

use clap::{Parser, Subcommand};

/// Shiftflow - café shift operations
#[derive(Parser)]
#[command(name = "shiftflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// Manage staff profiles
    Staff {
        #[command(subcommand)]
        command: StaffCommands,
    },

    /// Manage café locations
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },
}

#[derive(Subcommand)]
pub enum StaffCommands {
    /// Create a staff profile
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// barista, manager or core
        #[arg(long)]
        role: String,
        /// Four digit login PIN
        #[arg(long)]
        pin: String,
    },
    /// List every staff profile
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum LocationCommands {
    /// Create a location
    Add {
        /// Location name
        #[arg(long)]
        name: String,
    },
    /// List locations
    #[command(alias = "ls")]
    List,
}

pub use commands::*;
