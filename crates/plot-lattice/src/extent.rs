//! Grid extent inference.

use std::fmt;

use crate::coordinate::{Coordinate, Index};
use crate::error::{FigureError, FigureResult};

/// The inferred number of rows and columns of a figure.
///
/// The extent starts at `0 × 0` and only ever grows as concrete coordinate
/// components are observed. Slice components never grow their own dimension,
/// but a concrete column implies at least one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridExtent {
    rows: usize,
    cols: usize,
}

impl GridExtent {
    /// Create an empty extent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether no concrete row has been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Grow the extent to cover the concrete components of `coordinate`.
    ///
    /// # Errors
    ///
    /// [`FigureError::IndexOverflow`] if a component is `usize::MAX`; the
    /// extent is left unchanged.
    pub fn observe(&mut self, coordinate: &Coordinate) -> FigureResult<()> {
        *self = self.covering(coordinate)?;
        Ok(())
    }

    /// The extent after observing `coordinate`, without modifying `self`.
    pub fn covering(&self, coordinate: &Coordinate) -> FigureResult<Self> {
        let mut next = *self;
        if let Index::At(row) = coordinate.row {
            next.rows = next.rows.max(count(row)?);
        }
        if let Index::At(col) = coordinate.col {
            next.rows = next.rows.max(1);
            next.cols = next.cols.max(count(col)?);
        }
        Ok(next)
    }
}

/// Number of slots needed to hold `index`.
fn count(index: usize) -> FigureResult<usize> {
    index
        .checked_add(1)
        .ok_or(FigureError::IndexOverflow { index })
}

impl fmt::Display for GridExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
