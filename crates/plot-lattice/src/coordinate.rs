//! Grid coordinates.
//!
//! A [`Coordinate`] is a `(row, col)` pair of [`Index`] components. Each
//! component is either a concrete position or a slice covering part or all
//! of that dimension.
//!
//! Keys are passed to [`Figure::at`](crate::Figure::at) through
//! [`IntoCoordinate`]:
//!
//! ```
//! use plot_lattice::{Coordinate, Index, IntoCoordinate};
//!
//! // A concrete cell.
//! assert_eq!((1usize, 2usize).into_coordinate().unwrap(), Coordinate::new(1, 2));
//!
//! // Every row of column 1.
//! let column = (.., 1usize).into_coordinate().unwrap();
//! assert_eq!(column.to_string(), "(:, 1)");
//!
//! // A bare component addresses a column.
//! assert_eq!(3usize.into_coordinate().unwrap(), Coordinate::new(Index::All, 3));
//! ```

use std::fmt;
use std::ops::{Range, RangeFull};

use crate::error::{FigureError, FigureResult};

/// One component of a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// A concrete row or column.
    At(usize),
    /// Every row or column of the grid.
    All,
    /// The half-open span `start..end`, clipped to the grid when resolved.
    Range(Range<usize>),
}

impl Index {
    /// Whether this component is a slice (`All` or `Range`).
    pub fn is_slice(&self) -> bool {
        !matches!(self, Index::At(_))
    }

    /// The concrete position, if this component has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Index::At(i) => Some(*i),
            _ => None,
        }
    }

    /// The positions this component covers in a dimension of `len` entries.
    pub fn resolve(&self, len: usize) -> Range<usize> {
        match self {
            Index::At(i) if *i < len => *i..*i + 1,
            Index::At(_) => 0..0,
            Index::All => 0..len,
            Index::Range(r) => r.start.min(len)..r.end.min(len),
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::At(i) => write!(f, "{i}"),
            Index::All => write!(f, ":"),
            Index::Range(r) => write!(f, "{}:{}", r.start, r.end),
        }
    }
}

impl From<usize> for Index {
    fn from(i: usize) -> Self {
        Index::At(i)
    }
}

impl From<RangeFull> for Index {
    fn from(_: RangeFull) -> Self {
        Index::All
    }
}

impl From<Range<usize>> for Index {
    fn from(r: Range<usize>) -> Self {
        Index::Range(r)
    }
}

/// A `(row, col)` grid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// The row component.
    pub row: Index,
    /// The column component.
    pub col: Index,
}

impl Coordinate {
    /// Create a coordinate from two components.
    pub fn new(row: impl Into<Index>, col: impl Into<Index>) -> Self {
        Self {
            row: row.into(),
            col: col.into(),
        }
    }

    /// Whether either component is a slice.
    pub fn is_sliced(&self) -> bool {
        self.row.is_slice() || self.col.is_slice()
    }

    /// The concrete `(row, col)` position, if neither component is a slice.
    pub fn position(&self) -> Option<(usize, usize)> {
        Some((self.row.position()?, self.col.position()?))
    }

    /// Every concrete position this coordinate covers in a `rows × cols`
    /// grid, row-major.
    pub fn positions(&self, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
        let col_span = self.col.resolve(cols);
        self.row
            .resolve(rows)
            .flat_map(move |row| col_span.clone().map(move |col| (row, col)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Conversion into a grid key.
///
/// Pairs convert component-wise. A single component is taken as a column and
/// paired with [`Index::All`] for the row. Component sequences must have
/// exactly two entries.
pub trait IntoCoordinate {
    /// Convert into a coordinate, or fail with [`FigureError::MalformedKey`].
    fn into_coordinate(self) -> FigureResult<Coordinate>;
}

impl IntoCoordinate for Coordinate {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Ok(self)
    }
}

impl<R: Into<Index>, C: Into<Index>> IntoCoordinate for (R, C) {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Ok(Coordinate::new(self.0, self.1))
    }
}

impl IntoCoordinate for Index {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Ok(Coordinate::new(Index::All, self))
    }
}

impl IntoCoordinate for usize {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Index::from(self).into_coordinate()
    }
}

impl IntoCoordinate for RangeFull {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Index::from(self).into_coordinate()
    }
}

impl IntoCoordinate for Range<usize> {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        Index::from(self).into_coordinate()
    }
}

impl IntoCoordinate for &[Index] {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        match self {
            [row, col] => Ok(Coordinate::new(row.clone(), col.clone())),
            _ => Err(FigureError::MalformedKey {
                components: self.len(),
            }),
        }
    }
}

impl IntoCoordinate for Vec<Index> {
    fn into_coordinate(self) -> FigureResult<Coordinate> {
        self.as_slice().into_coordinate()
    }
}
