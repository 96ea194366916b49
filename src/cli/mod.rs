//! CLI module - Command-line interface for Reparr
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Reparr - Reverse-parser version reconciliation
/// Keeps stored release versions consistent with collected filenames
#[derive(Parser)]
#[command(name = "reparr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as background daemon with scheduler
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Re-resolve collected filenames and fix version drift
    #[command(alias = "apply")]
    Reconcile {
        /// Compute changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// List collected records with stored and resolved versions
    #[command(alias = "ls")]
    Report {
        /// Only show records no version rule classifies
        #[arg(long)]
        unclassified: bool,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u64,

        /// Records per page
        #[arg(long, default_value = "100")]
        limit: u64,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the effective version rules and evaluation order
    #[command(alias = "v")]
    Versions,

    /// Show recent reconcile runs
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// Add a media record to the library database
    #[command(alias = "a")]
    Add {
        /// Record title
        title: String,

        /// Filename the record was filled by
        #[arg(long)]
        file: Option<String>,

        /// Lifecycle state (default: Collected)
        #[arg(long, default_value = "Collected")]
        state: String,

        /// Stored version label
        #[arg(long)]
        version: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
