//! Command-line argument definitions for the eve2gns CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input lab, the output directory,
//! configuration file selection and logging verbosity.

use clap::Parser;

/// Command-line arguments for the EVE-NG to GNS3 converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the EVE-NG lab file
    #[arg(help = "Path to the input .unl file")]
    pub input: String,

    /// Directory the project folder is created in
    #[arg(short, long, default_value = ".")]
    pub dst_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// First console port; overrides the configuration file
    #[arg(long)]
    pub console_start_port: Option<u16>,

    /// Also print the project JSON to standard output
    #[arg(long)]
    pub stdout: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
