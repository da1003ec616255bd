//! sshgrid - main entry point.
//!
//! Usage: sshgrid [OPTIONS] DESTINATION...
//!        sshgrid --list
//!
//! Parses the command line, wires up diagnostics, and either launches a grid
//! of SSH sessions or lists the sessions a previous run created. Usage errors
//! exit 2 (clap); every other fatal error exits 1.

use clap::Parser;
use tracing::error;

use sshgrid::cli::Cli;
use sshgrid::host::TmuxHost;
use sshgrid::{launcher, logging, sessions};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let host = TmuxHost::new();
    let result = if cli.list {
        sessions::list(&host).await
    } else {
        let config = cli.to_config();
        launcher::launch(&host, &config, &cli.destinations).await
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
}
