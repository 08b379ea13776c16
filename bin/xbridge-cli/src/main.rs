//! Operator CLI for local chain, witness and bridge setups.

mod cli;
mod config;
mod constants;
mod handlers;

use anyhow::{Error, Result};
use clap::Parser;
use xbridge_common::logging::{self, LoggerConfig};
use xbridge_primitives::types::EntityKind;

use crate::{
    cli::{Cli, Commands},
    config::Config,
    handlers::{bridge, fund, list, process, Context},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let _guard = logging::init(
        LoggerConfig::for_service(constants::SERVICE_NAME).with_verbosity(cli.verbose),
    );

    let config = Config::load(cli.settings.as_deref())?;
    let ctx = Context::open(cli.data_dir, config)?;

    match cli.command {
        Commands::Chain(command) => process::handle_process(&ctx, EntityKind::Chain, command).await,
        Commands::Witness(command) => {
            process::handle_process(&ctx, EntityKind::Witness, command).await
        }
        Commands::Bridge(command) => bridge::handle_bridge(&ctx, command).await,
        Commands::Fund(args) => fund::handle_fund(&ctx, args).await,
        Commands::List => list::handle_list(&ctx),
    }
}
