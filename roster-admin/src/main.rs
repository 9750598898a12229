//! roster-admin: school roster administration from the command line.

use std::process::ExitCode;

use clap::Parser;

use roster_admin::cli::Cli;
use roster_admin::config::RosterConfig;
use roster_admin::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RosterConfig::load(cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.level().and_then(logging::init) {
        Ok(Some(path)) => log::info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    match cli.run(&config).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
