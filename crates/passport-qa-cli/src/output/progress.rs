//! Check progress on stderr.
//!
//! With a bar, the bar message keeps a running pass/fail tally. Without one,
//! only failed and skipped photos are reported, one line each.

use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use passport_qa_core::{ProgressEvent, ProgressSink};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Running pass/fail counts for one `check` run.
#[derive(Debug, Default)]
struct Tally {
    passed: AtomicUsize,
    failed: AtomicUsize,
}

impl Tally {
    fn record(&self, passed: bool) {
        let counter = if passed { &self.passed } else { &self.failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn summary(&self) -> String {
        format!(
            "{} passed, {} failed",
            self.passed.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed)
        )
    }
}

/// Progress reporter for `passport-qa check`.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
    tally: Tally,
}

impl ProgressBar {
    /// Creates a reporter.
    ///
    /// `quiet` silences everything. `show_bar` picks the bar over per-photo
    /// failure lines; `total` sizes the bar, or a spinner is used.
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        let bar = (!quiet && show_bar).then(|| {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self {
            bar,
            quiet,
            tally: Tally::default(),
        }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if let ProgressEvent::Completed { passed, .. } = &event {
            self.tally.record(*passed);
        }
        if self.quiet {
            return;
        }

        match (event, &self.bar) {
            (ProgressEvent::Started { index, total, .. }, Some(bar)) => {
                if let Some(t) = total {
                    bar.set_length(t as u64);
                }
                bar.set_position(index as u64);
            }
            (ProgressEvent::Completed { .. }, Some(bar)) => {
                bar.inc(1);
                bar.set_message(self.tally.summary());
            }
            (
                ProgressEvent::Completed {
                    path,
                    passed: false,
                    issues,
                },
                None,
            ) => eprintln!("{path}: FAILED, {issues} issue(s)"),
            (ProgressEvent::Skipped { path, reason }, bar) => {
                if let Some(bar) = bar {
                    bar.inc(1);
                }
                eprintln!("WARN: Skipping {path}: {reason}");
            }
            (ProgressEvent::Finished { skipped, .. }, Some(bar)) => {
                bar.finish_with_message(format!("{}, {skipped} skipped", self.tally.summary()));
            }
            _ => {}
        }
    }
}
