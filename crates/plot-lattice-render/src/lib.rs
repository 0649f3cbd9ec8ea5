//! Drawing-surface contracts for Plot Lattice.
//!
//! This crate defines everything that sits between the deferred figure
//! compositor and an actual plotting backend:
//!
//! - [`Command`] and [`ArgValue`]: a named operation with a dynamically
//!   typed argument bag, recorded now and executed later
//! - [`Surface`], [`Region`] and [`SurfaceFactory`]: a `rows × cols` grid of
//!   drawable regions and the factory that allocates it
//! - [`Validator`]: post-hoc structural checks on an assembled surface
//! - [`RecordingBackend`]: a headless backend that records every call
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use plot_lattice_render::{Command, Region, RenderResult};
//!
//! struct MyAxes { /* ... */ }
//!
//! impl Region for MyAxes {
//!     fn invoke(&mut self, command: &Command) -> RenderResult<()> {
//!         match command.operation() {
//!             "plot" => { /* draw a line series */ }
//!             other => {
//!                 return Err(RenderError::UnknownOperation { operation: other.into() })
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn is_blank(&self) -> bool {
//!         // ...
//!     }
//! }
//! ```

pub mod command;
mod error;
pub mod logging;
pub mod recording;
pub mod surface;
pub mod validator;

pub use command::{ArgValue, Command};
pub use error::{RenderError, RenderResult};
pub use recording::{
    DEFAULT_OPERATIONS, OperationSet, PresentationLog, RecordingBackend, RecordingRegion,
    RecordingSurface, RegionSnapshot, SurfaceSnapshot,
};
pub use surface::{Region, Surface, SurfaceFactory, SurfaceInspect};
pub use validator::{AcceptAll, StructuralValidator, ValidationIssue, ValidationReport, Validator};
