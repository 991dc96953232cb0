//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - discover: run a discovery pass and list the jobs found
//! - show: print one job schema as JSON
//! - validate: check parameter values against a job schema

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jobdex - discover job schemas from a class-metadata catalog
#[derive(Parser, Debug)]
#[command(name = "jobdex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog snapshot file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the generic handler interface
    #[arg(long, global = true)]
    pub handler_interface: Option<String>,

    /// Name of the request marker interface
    #[arg(long, global = true)]
    pub request_marker: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a discovery pass and list the discovered jobs
    Discover,

    /// Print the schema of one job as JSON
    Show {
        /// Job-type name to show
        job: String,
    },

    /// Validate parameter values against a job schema
    Validate {
        /// Job-type name to validate against
        job: String,

        /// Parameter values as name=value pairs
        #[arg(value_name = "NAME=VALUE")]
        values: Vec<String>,
    },
}
