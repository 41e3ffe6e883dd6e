use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prefix-exec-ctl")]
#[command(version, about = "Inspect and run exec requests for a relocated prefix", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show how a request would be rewritten
    prefix-exec-ctl plan $PREFIX/bin/python3 -c 'print(1)'
    prefix-exec-ctl plan --json /data/data/com.termux/files/usr/bin/bash

    # Run a program through the pipeline (searches PATH without a slash)
    prefix-exec-ctl run python3 script.py

    # Show environment, selected linker and configuration
    prefix-exec-ctl check
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration overriding the built-in defaults
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the disposition and rebuilt argv for a request without executing it
    Plan {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Program path
        path: String,

        /// Program arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Execute a program through the pipeline
    Run {
        /// Program path or name
        program: String,

        /// Program arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show environment snapshot, linker selection and configuration
    Check,
}
