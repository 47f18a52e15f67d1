//! Check command - validate photos on disk against a country's requirements.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use passport_qa_adapters::FsPhotoSource;
use passport_qa_core::{CountrySpec, PhotoSource, PhotoValidator, ProgressEvent, ProgressSink};
use tracing::info;

use super::{build_validator, ExitCode, StoreArgs};
use crate::config::AppConfig;
use crate::output::{CheckRecord, JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Arguments for `passport-qa check`.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Country whose requirements apply, exactly as listed by `countries`
    #[arg(short, long)]
    pub country: String,

    /// Files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Check dimensions and size only; skip the remote content model
    #[arg(long)]
    pub no_assessor: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        // Output format: CLI > config (accessor provides fallback)
        if self.format.is_none() {
            self.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| match s {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
        if !self.progress {
            self.progress = config.output.progress.unwrap_or(false);
        }

        self.store = self.store.with_config(config);
        self
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the check command.
pub struct CheckResult {
    /// Number of photos validated.
    pub processed: usize,
    /// Number of photos that could not be read.
    pub skipped: usize,
    /// Number of photos that failed validation.
    pub failed: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub async fn run(args: &CheckArgs, config: &AppConfig) -> Result<CheckResult> {
    info!(
        "Checking {} path(s) against {}",
        args.paths.len(),
        args.country
    );

    // Unknown country is an error before any file is touched
    let lookup = args.store.lookup()?;
    let spec = lookup.get_spec(&args.country).await?;

    let validator = build_validator(config, args.no_assessor)?;
    let source = FsPhotoSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    let batch = Batch { source: &source, total };
    process_photos(batch, &spec, &validator, &output, &progress_bar, args).await
}

/// Photos to check, with the total counted up front.
struct Batch<'a> {
    source: &'a dyn PhotoSource,
    total: Option<usize>,
}

/// Validate every photo from the source, writing one record each.
async fn process_photos(
    batch: Batch<'_>,
    spec: &CountrySpec,
    validator: &PhotoValidator,
    output: &JsonOutput,
    progress: &dyn ProgressSink,
    args: &CheckArgs,
) -> Result<CheckResult> {
    let Batch { source, total } = batch;
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut all_records: Vec<CheckRecord> = Vec::new();

    for (index, item) in source.photos().enumerate() {
        let photo = match item {
            Ok(photo) => photo,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("photo {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: photo.path.clone(),
            index,
            total,
        });

        let verdict = validator.validate(&photo.upload, spec).await;
        if !verdict.passed() {
            failed += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            path: photo.path.clone(),
            passed: verdict.passed(),
            issues: verdict.issues().len(),
        });

        let record = CheckRecord::new(photo.path, spec.country.clone(), verdict);
        match args.format() {
            OutputFormat::Jsonl => output.write(&record)?,
            OutputFormat::Json => all_records.push(record),
        }

        processed += 1;
    }

    // For JSON format, output all records as one array
    if args.format() == OutputFormat::Json {
        output.write_array(&all_records, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if failed > 0 {
        ExitCode::Failed
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        failed,
        exit_code,
    })
}
