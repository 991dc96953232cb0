//! CLI module for jobdex - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
