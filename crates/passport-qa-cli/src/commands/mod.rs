//! CLI command definitions and handlers.

pub mod check;
pub mod countries;
pub mod serve;
pub mod spec;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use passport_qa_adapters::{GeminiAssessor, GeminiConfig, InMemorySpecStore, LocalOnlyAssessor};
use passport_qa_core::pipeline::DEFAULT_ASSESS_TIMEOUT;
use passport_qa_core::{ContentAssessor, PhotoValidator, SpecLookupService};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Environment variable read for the Gemini API key unless configured.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Passport QA - Validate passport photos against country requirements
#[derive(Parser)]
#[command(name = "passport-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(serve::ServeArgs),
    /// List supported countries
    Countries(StoreArgs),
    /// Print one country's photo requirements
    Spec(spec::SpecArgs),
    /// Validate photos on disk against a country's requirements
    Check(check::CheckArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded; every photo passed.
    Success,
    /// At least one photo failed validation.
    Failed,
    /// The command could not run.
    Error,
}

impl ExitCode {
    /// Numeric status reported to the shell.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
            Self::Error => 2,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

/// Spec store selection shared by all commands.
#[derive(Args, Clone, Default)]
pub struct StoreArgs {
    /// JSON seed file with country specs (defaults to the bundled countries)
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

impl StoreArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if self.seed.is_none() {
            self.seed.clone_from(&config.store.seed);
        }
        self
    }

    /// Opens the configured store and wraps it in a lookup service.
    pub fn lookup(&self) -> Result<SpecLookupService> {
        let store = match &self.seed {
            Some(path) => {
                info!("Loading country specs from {}", path.display());
                InMemorySpecStore::load_json(path)
                    .with_context(|| format!("Failed to load seed {}", path.display()))?
            }
            None => InMemorySpecStore::bundled().context("Failed to load bundled seed")?,
        };
        debug!("Spec store holds {} countries", store.len());
        Ok(SpecLookupService::new(Arc::new(store)))
    }
}

/// Builds the photo validator from configuration.
///
/// With remote assessment disabled (by `--no-assessor` or
/// `assessor.enabled = false`), only dimension and size are checked.
pub fn build_validator(config: &AppConfig, no_assessor: bool) -> Result<PhotoValidator> {
    let settings = &config.assessor;
    let timeout = settings
        .timeout_secs
        .map_or(DEFAULT_ASSESS_TIMEOUT, Duration::from_secs);

    let assessor: Arc<dyn ContentAssessor> = if no_assessor || settings.enabled == Some(false) {
        info!("Remote assessment disabled; checking dimensions and size only");
        Arc::new(LocalOnlyAssessor::new())
    } else {
        let key_env = settings
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV);
        let api_key = std::env::var(key_env).with_context(|| {
            format!("{key_env} is not set. Set it, or pass --no-assessor to skip content checks")
        })?;

        let mut gemini = GeminiConfig::new(api_key).with_timeout_secs(timeout.as_secs());
        if let Some(url) = &settings.base_url {
            gemini = gemini.with_base_url(url.clone());
        }
        if let Some(model) = &settings.model {
            gemini = gemini.with_model(model.clone());
        }
        let client = GeminiAssessor::new(gemini).context("Failed to set up Gemini client")?;
        info!("Remote assessment via {}", client.endpoint());
        Arc::new(client)
    };

    Ok(PhotoValidator::new(assessor).with_timeout(timeout))
}
