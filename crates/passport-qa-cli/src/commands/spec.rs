//! Spec command - print one country's requirements.

use anyhow::Result;
use clap::Args;

use super::StoreArgs;
use crate::config::AppConfig;

/// Arguments for `passport-qa spec`.
#[derive(Args, Clone)]
pub struct SpecArgs {
    /// Country name, exactly as listed by `passport-qa countries`
    pub country: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Prints the country's spec as pretty JSON.
pub async fn run(args: &SpecArgs, config: &AppConfig) -> Result<()> {
    let lookup = args.store.clone().with_config(config).lookup()?;
    let spec = lookup.get_spec(&args.country).await?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
