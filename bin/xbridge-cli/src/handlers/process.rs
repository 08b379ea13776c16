use anyhow::Result;
use xbridge_primitives::types::EntityKind;
use xbridge_registry::ProcessRecord;
use xbridge_supervisor::{target, Supervisor, SystemLauncher};

use super::{CommandResultExt, Context};
use crate::cli::ProcessCommand;

/// Runs a chain or witness subcommand.
pub(crate) async fn handle_process(
    ctx: &Context,
    kind: EntityKind,
    command: ProcessCommand,
) -> Result<()> {
    let supervisor = Supervisor::new(&ctx.store, SystemLauncher, ctx.supervisor_config());

    match command {
        ProcessCommand::Start(args) => {
            let record = supervisor
                .start(kind, &args.name, &args.exe, &args.config)
                .await
                .while_trying(|| format!("start {kind} {}", args.name))?;
            println!(
                "started {kind} {} (pid {}), output in {}",
                record.name,
                record.process_id,
                supervisor.log_path(kind, &record.name).display()
            );
        }
        ProcessCommand::Stop(args) => {
            let target = target(args.name, args.all).while_trying(|| format!("stop {kind}"))?;
            let stopped = supervisor
                .stop(kind, &target)
                .await
                .while_trying(|| format!("stop {kind}"))?;
            report(kind, "stopped", &stopped);
        }
        ProcessCommand::Restart(args) => {
            let target =
                target(args.name, args.all).while_trying(|| format!("restart {kind}"))?;
            let restarted = supervisor
                .restart(kind, &target)
                .await
                .while_trying(|| format!("restart {kind}"))?;
            report(kind, "restarted", &restarted);
        }
    }

    Ok(())
}

fn report(kind: EntityKind, verb: &str, records: &[ProcessRecord]) {
    if records.is_empty() {
        println!("no {kind} running");
    }

    for record in records {
        println!("{verb} {kind} {} (pid {})", record.name, record.process_id);
    }
}
