use std::path::PathBuf;

use clap::{crate_version, ArgAction, Args, Parser, Subcommand};
use xbridge_deployer::constants::BOOTSTRAP_DIR_ENVVAR;
use xbridge_primitives::constants::DEFAULT_SIGNATURE_REWARD;

#[derive(Parser, Debug)]
#[command(
    name = "xbridge",
    about = "Start chains and witnesses, and set up cross-chain bridges between them",
    version = crate_version!()
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "XBRIDGE_HOME",
        help = "directory holding the registry and daemon logs"
    )]
    pub(crate) data_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "XBRIDGE_CONFIG",
        help = "TOML file with supervisor, rpc and funding settings"
    )]
    pub(crate) settings: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "more log output (-v debug, -vv trace); RUST_LOG overrides"
    )]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    /// Manage chain nodes.
    #[command(subcommand)]
    Chain(ProcessCommand),

    /// Manage witness servers.
    #[command(subcommand)]
    Witness(ProcessCommand),

    /// Manage bridges.
    #[command(subcommand)]
    Bridge(BridgeCommand),

    /// Fund an account from the genesis account of a chain.
    Fund(FundArgs),

    /// Print everything in the registry.
    List,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ProcessCommand {
    /// Start a daemon and record it.
    Start(StartArgs),

    /// Stop recorded daemons.
    Stop(TargetArgs),

    /// Stop recorded daemons and start them again with the same settings.
    Restart(TargetArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StartArgs {
    #[arg(long, help = "unique name for the daemon")]
    pub(crate) name: String,

    #[arg(long, help = "the daemon binary")]
    pub(crate) exe: PathBuf,

    #[arg(long, help = "the daemon's own configuration file")]
    pub(crate) config: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct TargetArgs {
    #[arg(long, help = "name of the record to act on")]
    pub(crate) name: Option<String>,

    #[arg(long, help = "act on every record; takes precedence over --name")]
    pub(crate) all: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum BridgeCommand {
    /// Define a bridge and activate it on both chains.
    Build(BuildArgs),

    /// Forget bridge records. No transactions are sent.
    Remove(TargetArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct BuildArgs {
    #[arg(long, help = "unique name for the bridge")]
    pub(crate) name: String,

    #[arg(
        long,
        num_args = 2,
        value_names = ["LOCKING", "ISSUING"],
        required = true,
        help = "the locking chain and the issuing chain"
    )]
    pub(crate) chains: Vec<String>,

    #[arg(
        long = "witness",
        required = true,
        help = "a witness attesting for the bridge; repeat for each witness"
    )]
    pub(crate) witnesses: Vec<String>,

    #[arg(
        long,
        env = BOOTSTRAP_DIR_ENVVAR,
        help = "bootstrap file, or the directory holding bridge_bootstrap.json"
    )]
    pub(crate) bootstrap: PathBuf,

    #[arg(
        long,
        default_value = DEFAULT_SIGNATURE_REWARD,
        help = "reward per witness signature, in drops"
    )]
    pub(crate) signature_reward: String,

    #[arg(
        long,
        help = "disable the door accounts' master keys after the signer lists are set"
    )]
    pub(crate) disable_master_key: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct FundArgs {
    #[arg(long, help = "name of a recorded chain")]
    pub(crate) chain: String,

    #[arg(long, help = "account to fund")]
    pub(crate) account: String,
}
