//! Logging facilities for Plot Lattice.
//!
//! Plot Lattice uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("plot_lattice=debug")
//!         .init();
//!
//!     // Build and show figures...
//! }
//! ```
//!
//! Cell access and mode transitions are logged at `trace`/`debug`, each
//! replayed command at `trace`, and validator findings in lenient mode at
//! `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Figure compositor target (access, mode transitions).
    pub const FIGURE: &str = "plot_lattice::figure";
    /// Command replay target.
    pub const REPLAY: &str = "plot_lattice::replay";
    /// Configuration loading target.
    pub const CONFIG: &str = "plot_lattice::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a whole materialize pass.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "plot_lattice::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
