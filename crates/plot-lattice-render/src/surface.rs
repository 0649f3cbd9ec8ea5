//! Surface contracts between the compositor and a drawing backend.
//!
//! A [`SurfaceFactory`] allocates a [`Surface`]: a `rows × cols` grid of
//! [`Region`]s plus the figure-level handle used for layout finalization,
//! display and persistence. The surface is always a 2-D grid, even when one
//! dimension is 1, so every region is addressed the same way.
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut surface = factory.create(2, 3)?;
//!
//! surface.region_mut(1, 2)?.invoke(&Command::new("plot").arg(vec![1, 2, 3]))?;
//!
//! surface.tight_layout()?;
//! surface.save(Path::new("figure.json"))?;
//! ```

use std::path::Path;

use crate::command::Command;
use crate::error::{RenderError, RenderResult};

/// One drawable sub-region (a single "axes") of a surface.
pub trait Region {
    /// Execute a named drawing operation with its recorded arguments.
    ///
    /// Regions reject operations they do not support with
    /// [`RenderError::UnknownOperation`].
    fn invoke(&mut self, command: &Command) -> RenderResult<()>;

    /// Whether nothing has been drawn on this region.
    fn is_blank(&self) -> bool;
}

/// A 2-D grid of regions plus the top-level figure handle.
pub trait Surface {
    /// The region type of this surface.
    type Region: Region;

    /// Number of rows and columns, in that order.
    fn dimensions(&self) -> (usize, usize);

    /// Borrow the region at `(row, col)`.
    fn region(&self, row: usize, col: usize) -> Option<&Self::Region>;

    /// Mutably borrow the region at `(row, col)`.
    fn region_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Region>;

    /// Finalize the layout so regions and their decorations do not overlap.
    fn tight_layout(&mut self) -> RenderResult<()>;

    /// Display the surface.
    fn show(&mut self) -> RenderResult<()>;

    /// Persist the surface to `destination`.
    fn save(&mut self, destination: &Path) -> RenderResult<()>;

    /// Mutably borrow a region, failing if it lies outside the grid.
    fn try_region_mut(&mut self, row: usize, col: usize) -> RenderResult<&mut Self::Region> {
        self.region_mut(row, col)
            .ok_or(RenderError::RegionOutOfBounds { row, col })
    }
}

/// Allocates surfaces sized to an inferred grid extent.
pub trait SurfaceFactory {
    /// The surface type produced by this factory.
    type Surface: Surface;

    /// Create a surface with `rows × cols` regions.
    fn create(&mut self, rows: usize, cols: usize) -> RenderResult<Self::Surface>;
}

/// Object-safe, read-only view of a surface used by validators.
pub trait SurfaceInspect {
    /// Number of rows and columns, in that order.
    fn dimensions(&self) -> (usize, usize);

    /// Whether the region at `(row, col)` has nothing drawn on it.
    ///
    /// Positions outside the grid report `false`.
    fn is_region_blank(&self, row: usize, col: usize) -> bool;
}

impl<S: Surface> SurfaceInspect for S {
    fn dimensions(&self) -> (usize, usize) {
        Surface::dimensions(self)
    }

    fn is_region_blank(&self, row: usize, col: usize) -> bool {
        self.region(row, col).is_some_and(Region::is_blank)
    }
}
