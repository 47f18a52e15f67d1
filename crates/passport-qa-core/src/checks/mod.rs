//! Local checks computed without any external call.

mod metrics;

pub use metrics::LocalMetricChecker;
