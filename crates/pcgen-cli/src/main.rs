//! PCGen CLI - affiliate link and donation narrative generator.
//!
//! # Usage
//!
//! ```bash
//! # List programs from ./data/json
//! pcgen programs
//!
//! # Generate from an affiliate code and copy the narrative
//! pcgen generate --program zakat --code ali99
//!
//! # Check a full link and share it on WhatsApp
//! pcgen generate --program zakat --link "https://donasi.example/zakat?affiliate_code=ali99" --share
//!
//! # Load data from a remote site
//! pcgen --data https://example.github.io/PCGenerator programs
//!
//! # Open a QRIS download
//! pcgen qris Jakarta
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod context;
mod error;
mod output;
mod system;

use cli::{Cli, Commands};
use error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { global, command } = Cli::parse();
    init_tracing(global.verbose);

    let outcome = match command {
        Commands::Programs => commands::catalog::execute_programs(&global).await,
        Commands::Regions => commands::catalog::execute_regions(&global).await,
        Commands::Generate(args) => commands::generate::execute(args, &global).await,
        Commands::Poster(args) => commands::download::execute_poster(args, &global).await,
        Commands::Qris(args) => commands::download::execute_qris(args, &global).await,
        Commands::Interactive => commands::interactive::execute(&global).await,
        Commands::Settings(args) => commands::settings::execute(args, &global),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !matches!(err.downcast_ref::<CliError>(), Some(CliError::Reported)) {
                output::print_error(&format!("{err:#}"));
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
