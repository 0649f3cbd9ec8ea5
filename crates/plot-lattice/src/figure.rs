//! The deferred figure compositor.
//!
//! A [`Figure`] hands out [`CommandCell`]s for grid coordinates, infers the
//! grid extent from every coordinate requested, and only allocates a real
//! surface when it is materialized.
//!
//! # Grid Mode
//!
//! ```
//! use plot_lattice::{Command, Figure, Surface};
//!
//! // Regions left blank only produce warnings.
//! let mut fig = Figure::new().strict(false);
//! fig.at((0, 0))?.record(Command::new("plot").arg(vec![1, 2, 3]));
//! fig.at((1, 2))?.record(Command::new("scatter").arg(vec![4, 5]).arg(vec![6, 7]));
//! fig.at((.., 0))?.record(Command::new("grid").arg(true));
//!
//! assert_eq!((fig.extent().rows(), fig.extent().cols()), (2, 3));
//!
//! let surface = fig.materialize()?;
//! assert_eq!(surface.region(1, 0).unwrap().operations(), vec!["grid"]);
//! # Ok::<(), plot_lattice::FigureError>(())
//! ```
//!
//! # Single-Cell Mode
//!
//! ```
//! use plot_lattice::{Command, Figure, FigureError};
//!
//! let mut fig = Figure::new();
//! fig.record(Command::new("plot").arg(vec![1, 2, 3]))?;
//!
//! // The single implicit cell is used up.
//! assert!(matches!(
//!     fig.record(Command::new("plot")),
//!     Err(FigureError::ModeConflict { .. })
//! ));
//! # Ok::<(), FigureError>(())
//! ```
//!
//! # Replay Order
//!
//! Materializing replays every explicitly addressed cell in registration
//! order, then every slice-addressed cell against each region it covers
//! (row-major). A slice command can therefore draw over explicit commands on
//! the same region, never the other way around.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use plot_lattice_render::{
    Command, RecordingBackend, Region, StructuralValidator, Surface, SurfaceFactory, Validator,
};

use crate::cell::CommandCell;
use crate::config::FigureConfig;
use crate::coordinate::{Coordinate, IntoCoordinate};
use crate::error::{FigureError, FigureResult};
use crate::extent::GridExtent;
use crate::logging::{PerfSpan, targets};
use crate::mode::{Access, AddressingMode};

/// Global figure counter for unique IDs.
static NEXT_FIGURE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureId(u64);

impl FigureId {
    fn next() -> Self {
        Self(NEXT_FIGURE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grid of plots described by deferred commands.
///
/// See the [module documentation](self) for usage.
pub struct Figure<B: SurfaceFactory = RecordingBackend> {
    id: FigureId,
    explicit_cells: Vec<CommandCell>,
    range_cells: Vec<CommandCell>,
    mode: AddressingMode,
    extent: GridExtent,
    config: FigureConfig,
    backend: B,
    validator: Box<dyn Validator>,
}

impl Figure {
    /// Create a figure drawing on a default [`RecordingBackend`].
    pub fn new() -> Self {
        Self::with_config(FigureConfig::default())
    }

    /// Create a figure with `config`, drawing on a default [`RecordingBackend`].
    pub fn with_config(config: FigureConfig) -> Self {
        let mut figure = Self::with_backend(RecordingBackend::new());
        figure.set_config(config);
        figure
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SurfaceFactory> Figure<B> {
    /// Create a figure that materializes on surfaces from `backend`.
    ///
    /// Uses the default configuration and a [`StructuralValidator`].
    pub fn with_backend(backend: B) -> Self {
        let id = FigureId::next();
        tracing::debug!(target: targets::FIGURE, figure = %id, "created figure");
        Self {
            id,
            explicit_cells: Vec::new(),
            range_cells: Vec::new(),
            mode: AddressingMode::Unset,
            extent: GridExtent::new(),
            config: FigureConfig::default(),
            backend,
            validator: Box::new(StructuralValidator::new()),
        }
    }

    /// Set whether validator findings are errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Set whether `show`/`save` finalize the layout first.
    pub fn tight_layout(mut self, tight_layout: bool) -> Self {
        self.config.tight_layout = tight_layout;
        self
    }

    /// Replace the validator run after every replay.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: FigureConfig) {
        self.config = config;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The figure's unique identifier.
    #[inline]
    pub fn id(&self) -> FigureId {
        self.id
    }

    /// The current addressing mode.
    #[inline]
    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// The grid extent inferred so far.
    #[inline]
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Cells addressed by fully concrete coordinates, in registration order.
    pub fn explicit_cells(&self) -> &[CommandCell] {
        &self.explicit_cells
    }

    /// Cells addressed with at least one slice component, in registration order.
    pub fn range_cells(&self) -> &[CommandCell] {
        &self.range_cells
    }

    /// The surface factory.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Request a new cell for `key`.
    ///
    /// Every call creates a new, independently tracked cell, even for a
    /// coordinate that was requested before. A bare component such as `1` or
    /// `..` addresses a column and is normalized to `(.., component)`.
    ///
    /// # Errors
    ///
    /// - [`FigureError::MalformedKey`] if `key` does not have two components
    /// - [`FigureError::IndexOverflow`] if a component is `usize::MAX`
    /// - [`FigureError::ModeConflict`] if the figure is in single-cell mode
    pub fn at(&mut self, key: impl IntoCoordinate) -> FigureResult<&mut CommandCell> {
        let coordinate = key.into_coordinate()?;
        let sliced = coordinate.is_sliced();
        let extent = self.extent.covering(&coordinate)?;
        self.transition(Access::Indexed { sliced })?;
        self.extent = extent;

        tracing::trace!(
            target: targets::FIGURE,
            figure = %self.id,
            %coordinate,
            extent = %self.extent,
            "cell requested"
        );

        let cells = if sliced {
            &mut self.range_cells
        } else {
            &mut self.explicit_cells
        };
        Ok(push_cell(cells, coordinate))
    }

    /// Switch to single-cell mode and return the implicit cell at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// [`FigureError::ModeConflict`] unless this is the first access of the
    /// figure.
    pub fn enter_single_cell(&mut self) -> FigureResult<&mut CommandCell> {
        self.transition(Access::Direct)?;
        let coordinate = Coordinate::new(0, 0);
        self.extent.observe(&coordinate)?;
        Ok(push_cell(&mut self.explicit_cells, coordinate))
    }

    /// Record `command` on the figure as a whole (single-cell mode).
    ///
    /// # Errors
    ///
    /// [`FigureError::ModeConflict`] if the figure was already indexed or the
    /// implicit cell was already recorded.
    pub fn record(&mut self, command: Command) -> FigureResult<()> {
        self.enter_single_cell()?.record(command);
        Ok(())
    }

    fn transition(&mut self, access: Access) -> FigureResult<()> {
        let next = self.mode.transition(access)?;
        if next != self.mode {
            tracing::debug!(
                target: targets::FIGURE,
                figure = %self.id,
                from = %self.mode,
                to = %next,
                "addressing mode changed"
            );
            self.mode = next;
        }
        Ok(())
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    /// Allocate a surface sized to the extent and replay every recorded command.
    ///
    /// Each call starts from scratch: a new surface is created and the full
    /// recorded state is replayed onto it, then validated with the configured
    /// strictness.
    ///
    /// # Errors
    ///
    /// - [`FigureError::EmptyGrid`] if no concrete coordinate was ever
    ///   requested; no surface is allocated in that case
    /// - [`FigureError::Render`] for surface creation, unknown operations, and
    ///   validation failures, passed through unchanged
    pub fn materialize(&mut self) -> FigureResult<B::Surface> {
        let _span = PerfSpan::new("materialize");

        if self.extent.is_empty() {
            return Err(FigureError::EmptyGrid);
        }

        let (rows, cols) = (self.extent.rows(), self.extent.cols());
        let mut surface = self.backend.create(rows, cols)?;

        for cell in &self.explicit_cells {
            let Some(command) = cell.command() else {
                tracing::debug!(target: targets::REPLAY, cell = %cell, "skipping empty cell");
                continue;
            };
            if let Some((row, col)) = cell.coordinate().position() {
                replay(&mut surface, row, col, command)?;
            }
        }

        for cell in &self.range_cells {
            let Some(command) = cell.command() else {
                tracing::debug!(target: targets::REPLAY, cell = %cell, "skipping empty cell");
                continue;
            };
            for (row, col) in cell.coordinate().positions(rows, cols) {
                replay(&mut surface, row, col, command)?;
            }
        }

        self.validator.validate(&surface, self.config.strict)?;
        Ok(surface)
    }

    /// Materialize, finalize the layout, and display the figure.
    pub fn show(&mut self) -> FigureResult<()> {
        let mut surface = self.present()?;
        surface.show()?;
        Ok(())
    }

    /// Materialize, finalize the layout, and persist the figure to `destination`.
    pub fn save(&mut self, destination: impl AsRef<Path>) -> FigureResult<()> {
        let mut surface = self.present()?;
        surface.save(destination.as_ref())?;
        Ok(())
    }

    fn present(&mut self) -> FigureResult<B::Surface> {
        let mut surface = self.materialize()?;
        if self.config.tight_layout {
            surface.tight_layout()?;
        }
        Ok(surface)
    }
}

fn push_cell(cells: &mut Vec<CommandCell>, coordinate: Coordinate) -> &mut CommandCell {
    cells.push(CommandCell::new(coordinate));
    let index = cells.len() - 1;
    &mut cells[index]
}

/// Execute `command` on the region at `(row, col)`.
fn replay<S: Surface>(
    surface: &mut S,
    row: usize,
    col: usize,
    command: &Command,
) -> FigureResult<()> {
    tracing::trace!(target: targets::REPLAY, row, col, %command, "replay");
    surface.try_region_mut(row, col)?.invoke(command)?;
    Ok(())
}

impl<B: SurfaceFactory> fmt::Display for Figure<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<figure: {}>", self.id)
    }
}

impl<B: SurfaceFactory + fmt::Debug> fmt::Debug for Figure<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("extent", &self.extent)
            .field("explicit_cells", &self.explicit_cells)
            .field("range_cells", &self.range_cells)
            .field("config", &self.config)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Figure: Send, Sync);
