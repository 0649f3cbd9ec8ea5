//! Plot Lattice - deferred subplot grids.
//!
//! Describe a grid of plots by indexing into a [`Figure`] and recording
//! commands on the returned cells. Nothing is drawn until the figure is
//! materialized: the grid's shape is inferred from every coordinate used,
//! a surface of that size is requested from the backend, and the recorded
//! commands are replayed onto it.
//!
//! - **Cells**: [`CommandCell`] holds one deferred [`Command`]
//! - **Compositor**: [`Figure`] hands out cells, infers the [`GridExtent`],
//!   and resolves the [`AddressingMode`]
//! - **Backends**: anything implementing [`SurfaceFactory`]; the default is
//!   the headless [`RecordingBackend`]
//!
//! # Example
//!
//! ```no_run
//! use plot_lattice::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut fig = Figure::new();
//!
//!     fig.at((0, 0))?.record(Command::new("plot").arg(vec![1, 4, 9]));
//!     fig.at((0, 1))?.record(Command::new("bar").arg(vec![3, 1, 2]));
//!     fig.at(..)?.record(Command::new("grid").arg(true));
//!
//!     fig.save("figure.json")?;
//!     Ok(())
//! }
//! ```

pub mod cell;
pub mod config;
pub mod coordinate;
mod error;
pub mod extent;
pub mod figure;
pub mod logging;
pub mod mode;
pub mod prelude;

pub use cell::CommandCell;
pub use config::{ConfigFormat, FigureConfig};
pub use coordinate::{Coordinate, Index, IntoCoordinate};
pub use error::{FigureError, FigureResult};
pub use extent::GridExtent;
pub use figure::{Figure, FigureId};
pub use mode::{Access, AddressingMode};

pub use plot_lattice_render::{
    AcceptAll, ArgValue, Command, RecordingBackend, RecordingRegion, RecordingSurface, Region,
    RenderError, RenderResult, StructuralValidator, Surface, SurfaceFactory, SurfaceInspect,
    ValidationIssue, ValidationReport, Validator,
};

/// Surface contracts and the recording backend.
pub mod render {
    pub use plot_lattice_render::*;
}
