//! Almanac CLI: the `almanac` command.

mod cli;
mod commands;
mod config;
mod parse;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let config = support::load_config_or_exit(cli.config.as_deref());
    support::init_logging(config.log_filter.as_deref(), cli.log_span_durations);

    match cli.command {
        Commands::Lowest {
            input,
            layout,
            parallel,
            json,
        } => commands::lowest::run(commands::lowest::Args {
            input,
            layout,
            parallel,
            json,
            config,
        }),

        Commands::Trace { input, seed, json } => commands::trace::run(input, seed, &config, json),

        Commands::Check { input, json } => commands::check::run(input, json),
    }
}
