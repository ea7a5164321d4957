//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`check`], [`filter`], [`init`], or [`validate`].
//! Each handler lives in its own submodule.

pub mod check;
pub mod filter;
pub mod init;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::HealthCheckError;

pub async fn dispatch(cli: Cli) -> Result<(), HealthCheckError> {
    match cli.command {
        Some(Commands::Check(args)) => check::execute(args).await,
        Some(Commands::Filter(ref args)) => filter::execute(args),
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  healthcheck v{version}: concurrent TCP/HTTP endpoint health checks\n\n  \
         No command provided. To get started:\n\n    \
         healthcheck init                    Generate a starter config\n    \
         healthcheck check                   Probe endpoints (auto-detects ./healthcheck.yaml)\n    \
         healthcheck check -c prod.yaml      Probe with a specific config file\n    \
         healthcheck --help                  See all commands and options\n"
    );
}
