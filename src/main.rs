use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Assemble { project, element, target, output } => {
            commands::handle_assemble(&project, &element, &target, &output, cli.quiet)
        }
        Commands::Check { project, element, target, format, exit_zero } => {
            commands::handle_check(&project, &element, &target, format, exit_zero, cli.quiet)
        }
        Commands::Deps { project, target, scope } => {
            commands::handle_deps(&project, &target, &scope)
        }
        Commands::Key { element } => {
            commands::handle_key(&element)
        }
    }
}
