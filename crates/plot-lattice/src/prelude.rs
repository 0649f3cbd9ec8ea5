//! Prelude module for Plot Lattice.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use plot_lattice::prelude::*;
//! ```
//!
//! This provides access to:
//! - The compositor (`Figure`, `CommandCell`, `FigureConfig`)
//! - Grid keys (`Coordinate`, `Index`)
//! - Deferred commands (`Command`, `ArgValue`)
//! - Surface contracts (`Surface`, `Region`, `SurfaceFactory`, `Validator`)

// ============================================================================
// Compositor
// ============================================================================

pub use crate::{CommandCell, Figure, FigureConfig, FigureError, FigureResult};

// ============================================================================
// Grid Keys
// ============================================================================

pub use crate::{Coordinate, Index, IntoCoordinate};

// ============================================================================
// Commands and Surfaces
// ============================================================================

pub use crate::{ArgValue, Command, Region, Surface, SurfaceFactory, Validator};
