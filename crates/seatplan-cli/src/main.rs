mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod render;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::Session;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("Seatplan CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let session = Session {
        config_path: cli.config.clone(),
        quiet: cli.quiet,
    };
    let command_name = cli.command.name();

    let command_result = match cli.command {
        Commands::Import(args) => {
            info!("Dispatching to 'import' command.");
            commands::import::run(args, &session)
        }
        Commands::Show { plan } => {
            info!("Dispatching to 'show' command.");
            commands::show::run(&plan)
        }
        command => {
            info!("Dispatching to '{}' command.", command_name);
            commands::edit::run(command, &session)
        }
    };

    match &command_result {
        Ok(_) => info!("Command '{}' completed successfully.", command_name),
        Err(e) => error!("Command '{}' failed: {}", command_name, e),
    }

    command_result
}
