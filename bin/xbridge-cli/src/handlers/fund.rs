use anyhow::Result;
use xbridge_deployer::{AccountFunder, GenesisFunder};

use super::{CommandResultExt, Context};
use crate::cli::FundArgs;

pub(crate) async fn handle_fund(ctx: &Context, args: FundArgs) -> Result<()> {
    let funder = GenesisFunder::new(
        &ctx.store,
        ctx.client_factory(),
        ctx.config.funding.clone(),
    );

    funder
        .fund_account(&args.chain, &args.account)
        .await
        .while_trying(|| format!("fund {} on chain {}", args.account, args.chain))?;
    println!(
        "funded {} with {} drops on chain {}",
        args.account, ctx.config.funding.amount, args.chain
    );

    Ok(())
}
