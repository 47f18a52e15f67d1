//! Serve command - run the HTTP API.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use passport_qa_server::{AppState, DEFAULT_MAX_UPLOAD_BYTES};
use tracing::info;

use super::{build_validator, StoreArgs};
use crate::config::AppConfig;

/// Port used when neither CLI nor config set one.
pub const DEFAULT_PORT: u16 = 4000;

/// Arguments for `passport-qa serve`.
#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Check dimensions and size only; skip the remote content model
    #[arg(long)]
    pub no_assessor: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl ServeArgs {
    /// Resolves the listen address: CLI, then config, then defaults.
    fn addr(&self, config: &AppConfig) -> Result<SocketAddr> {
        let ip = match (self.bind, config.server.bind.as_deref()) {
            (Some(ip), _) => ip,
            (None, Some(bind)) => bind
                .parse()
                .with_context(|| format!("Invalid server.bind address '{bind}'"))?,
            (None, None) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = self.port.or(config.server.port).unwrap_or(DEFAULT_PORT);
        Ok(SocketAddr::new(ip, port))
    }
}

/// Builds the service graph and serves until Ctrl-C.
pub async fn run(args: &ServeArgs, config: &AppConfig) -> Result<()> {
    let store = args.store.clone().with_config(config);
    let lookup = store.lookup()?;
    let validator = build_validator(config, args.no_assessor)?;
    let max_upload_bytes = config
        .server
        .max_upload_bytes
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    let addr = args.addr(config)?;
    info!(%addr, max_upload_bytes, "Starting server");

    let state =
        AppState::new(lookup, Arc::new(validator)).with_max_upload_bytes(max_upload_bytes);
    passport_qa_server::serve(addr, state).await
}
