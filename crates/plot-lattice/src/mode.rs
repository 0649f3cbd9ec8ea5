//! Addressing mode state machine.
//!
//! A figure is either used as one implicit cell (commands recorded directly on
//! the figure) or as a grid (cells obtained by index). The first access
//! decides which; mixing the two afterwards is a
//! [`FigureError::ModeConflict`].
//!
//! | current        | `Direct`     | `Indexed` (sliced) | `Indexed` (concrete) |
//! |----------------|--------------|--------------------|----------------------|
//! | `Unset`        | `SingleCell` | `Range`            | `ExplicitGrid`       |
//! | `SingleCell`   | conflict     | conflict           | conflict             |
//! | `Range`        | conflict     | `Range`            | `ExplicitGrid`       |
//! | `ExplicitGrid` | conflict     | `ExplicitGrid`     | `ExplicitGrid`       |

use std::fmt;

use crate::error::{FigureError, FigureResult};

/// How a figure's cells are being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressingMode {
    /// Nothing has been accessed yet.
    #[default]
    Unset,
    /// The whole figure is one implicit cell at `(0, 0)`.
    SingleCell,
    /// Only slice-addressed cells have been requested so far.
    Range,
    /// At least one fully concrete cell has been requested.
    ExplicitGrid,
}

impl AddressingMode {
    /// Whether the figure is used as a grid (`Range` or `ExplicitGrid`).
    pub fn is_grid(self) -> bool {
        matches!(self, AddressingMode::Range | AddressingMode::ExplicitGrid)
    }

    /// Compute the mode after `access`, or the conflict it causes.
    pub fn transition(self, access: Access) -> FigureResult<Self> {
        use AddressingMode::*;

        match (self, access) {
            (Unset, Access::Direct) => Ok(SingleCell),
            (Unset, Access::Indexed { sliced: true }) => Ok(Range),
            (Unset, Access::Indexed { sliced: false }) => Ok(ExplicitGrid),
            (Range, Access::Indexed { sliced: true }) => Ok(Range),
            (Range | ExplicitGrid, Access::Indexed { .. }) => Ok(ExplicitGrid),
            (SingleCell | Range | ExplicitGrid, _) => Err(FigureError::ModeConflict {
                mode: self,
                attempted: access,
            }),
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingMode::Unset => write!(f, "unset"),
            AddressingMode::SingleCell => write!(f, "single-cell"),
            AddressingMode::Range => write!(f, "range"),
            AddressingMode::ExplicitGrid => write!(f, "explicit-grid"),
        }
    }
}

/// The kind of access that drives a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// A command recorded directly on the figure.
    Direct,
    /// A cell requested by coordinate.
    Indexed {
        /// Whether either coordinate component is a slice.
        sliced: bool,
    },
}
