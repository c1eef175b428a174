//! Command dispatch: bridges CLI args -> core pipelines -> output formatting.

pub mod config_cmd;
pub mod inventory;
pub mod provision;
pub mod regions;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Provision(args) => provision::handle(args, global).await,
        Command::Inventory(args) => inventory::handle(args, global).await,
        Command::Regions => regions::handle(global),
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(args) => {
            use clap::CommandFactory;

            let mut cmd = crate::cli::Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "mistly", &mut std::io::stdout());
            Ok(())
        }
    }
}
