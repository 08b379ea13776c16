use anyhow::{Context as _, Result};

use super::Context;

pub(crate) fn handle_list(ctx: &Context) -> Result<()> {
    let registry = ctx.store.load().context("load registry")?;
    let rendered = serde_json::to_string_pretty(&registry).context("render registry")?;
    println!("{rendered}");

    Ok(())
}
