//! Log targets of the render layer.
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("plot_lattice_render::validator=warn")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Recording backend target (region calls, shown and saved surfaces).
    pub const RECORDING: &str = "plot_lattice_render::recording";
    /// Validator target (lenient-mode findings).
    pub const VALIDATOR: &str = "plot_lattice_render::validator";
}
