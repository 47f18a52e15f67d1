//! Countries command - list supported countries.

use std::io::Write;

use anyhow::Result;

use super::StoreArgs;
use crate::config::AppConfig;

/// Prints one country name per line, in store order.
pub async fn run(args: &StoreArgs, config: &AppConfig) -> Result<()> {
    let lookup = args.clone().with_config(config).lookup()?;
    let countries = lookup.list_countries().await?;

    let mut out = std::io::stdout().lock();
    for summary in countries {
        writeln!(out, "{}", summary.country)?;
    }
    out.flush()?;
    Ok(())
}
