use anyhow::{bail, Context as _, Result};
use xbridge_deployer::{BridgeDeployer, BuildRequest, DeploymentReport, GenesisFunder};
use xbridge_registry::RemoveTarget;

use super::{CommandResultExt, Context};
use crate::cli::{BridgeCommand, BuildArgs, TargetArgs};

pub(crate) async fn handle_bridge(ctx: &Context, command: BridgeCommand) -> Result<()> {
    match command {
        BridgeCommand::Build(args) => handle_build(ctx, args).await,
        BridgeCommand::Remove(args) => handle_remove(ctx, args),
    }
}

async fn handle_build(ctx: &Context, args: BuildArgs) -> Result<()> {
    let [locking, issuing]: [String; 2] = args.chains.try_into().map_err(|chains: Vec<String>| {
        anyhow::anyhow!("expected two chains, got {}", chains.len())
    })?;

    let request = BuildRequest::new(
        args.name,
        (locking, issuing),
        args.witnesses,
        args.bootstrap,
    )
    .with_signature_reward(args.signature_reward)
    .with_master_key_disabled(args.disable_master_key);

    let funder = GenesisFunder::new(
        &ctx.store,
        ctx.client_factory(),
        ctx.config.funding.clone(),
    );
    let deployer = BridgeDeployer::new(
        &ctx.store,
        ctx.client_factory(),
        funder,
        ctx.config.funding.on_failure,
    );

    let report = deployer
        .build(&request)
        .await
        .while_trying(|| format!("build bridge {}", request.name))?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &DeploymentReport) {
    let record = &report.record;
    println!(
        "bridge {} active between {} (locking) and {} (issuing)",
        record.name, record.chain_pair.0, record.chain_pair.1
    );
    println!(
        "  doors: {} / {}",
        record.door_accounts.0, record.door_accounts.1
    );
    println!(
        "  min account create amounts: {} / {}",
        record.account_create_amounts.0, record.account_create_amounts.1
    );

    for tx in &report.submitted {
        match &tx.hash {
            Some(hash) => println!("  {} on {} side ({hash})", tx.kind, tx.side),
            None => println!("  {} on {} side", tx.kind, tx.side),
        }
    }

    for (chain, account) in &report.funded {
        println!("  funded {account} on {chain}");
    }
}

fn handle_remove(ctx: &Context, args: TargetArgs) -> Result<()> {
    let target = RemoveTarget::from_flags(args.name, args.all)?;
    let removed = ctx
        .store
        .remove_bridges(&target)
        .context("remove bridge records")?;

    if let RemoveTarget::Name(name) = &target {
        if removed.is_empty() {
            bail!("bridge {name} does not exist");
        }
    }

    for bridge in &removed {
        println!("removed bridge {}", bridge.name);
    }

    Ok(())
}
