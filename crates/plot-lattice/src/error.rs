//! Error types for Plot Lattice.

use plot_lattice_render::RenderError;
use thiserror::Error;

use crate::mode::{Access, AddressingMode};

/// The main error type for figure operations.
#[derive(Error, Debug)]
pub enum FigureError {
    /// A grid key did not have exactly two components.
    #[error("malformed grid key: expected 2 components (row, col), got {components}")]
    MalformedKey { components: usize },

    /// A concrete grid index was too large to size the grid with.
    #[error("grid index {index} is too large to size a grid with")]
    IndexOverflow { index: usize },

    /// Single-cell and indexed access were mixed on one figure.
    #[error("{}", mode_conflict_message(.mode, .attempted))]
    ModeConflict {
        mode: AddressingMode,
        attempted: Access,
    },

    /// Materialize was requested before any concrete cell was addressed.
    #[error("nothing to plot: no concrete grid cell has been addressed")]
    EmptyGrid,

    /// The configuration could not be read or parsed.
    #[error("invalid figure configuration: {0}")]
    Config(String),

    /// Failure raised by the surface, its regions, or the validator.
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn mode_conflict_message(mode: &AddressingMode, attempted: &Access) -> &'static str {
    if mode.is_grid() {
        return "grid mode is selected; get cells via indices, e.g. fig.at(0)?.record(...)";
    }
    match attempted {
        Access::Direct => {
            "the implicit single cell is already recorded; get cells via indices, e.g. fig.at((0, 1))?.record(...)"
        }
        Access::Indexed { .. } => {
            "single-cell mode is selected; indexed access cannot be mixed with direct recording"
        }
    }
}

/// A specialized Result type for figure operations.
pub type FigureResult<T> = std::result::Result<T, FigureError>;
