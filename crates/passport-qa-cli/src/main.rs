//! Passport QA CLI - Validate passport photos against country requirements.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let result = match cli.command {
        Commands::Serve(ref args) => commands::serve::run(args, &config)
            .await
            .map(|()| ExitCode::Success),
        Commands::Countries(ref args) => commands::countries::run(args, &config)
            .await
            .map(|()| ExitCode::Success),
        Commands::Spec(ref args) => commands::spec::run(args, &config)
            .await
            .map(|()| ExitCode::Success),
        Commands::Check(args) => {
            let args = args.with_config(&config);
            commands::check::run(&args, &config).await.map(|result| {
                info!(
                    "Done: {} validated, {} failed, {} skipped",
                    result.processed, result.failed, result.skipped
                );
                result.exit_code
            })
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
