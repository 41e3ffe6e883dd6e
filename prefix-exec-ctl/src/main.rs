//! prefix-exec-ctl - inspect and run exec requests for a relocated prefix

mod cli;
mod commands;
mod config;
mod logging;
mod runner;

use clap::Parser;
use cli::{Cli, Commands};
use console::style;

fn main() {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Plan { json, path, args } => commands::show_plan(&config, &path, &args, json),
        Commands::Check => commands::check_environment(&config),
        Commands::Run { program, args } => {
            let err = runner::run_program(config, &program, &args);
            runner::report_failure(&program, &err);
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}
