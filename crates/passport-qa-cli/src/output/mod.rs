//! Output formatting for CLI.

mod json;
mod progress;
mod record;

pub use json::JsonOutput;
pub use progress::ProgressBar;
pub use record::CheckRecord;
