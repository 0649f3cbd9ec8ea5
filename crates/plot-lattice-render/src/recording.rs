//! Headless backend that records every drawing call.
//!
//! [`RecordingBackend`] is the default [`SurfaceFactory`]. Its regions keep
//! the ordered list of commands executed on them instead of rasterizing
//! anything, which makes it suitable for tests, dry runs, and exporting a
//! figure description to another tool.
//!
//! - `show()` appends a [`SurfaceSnapshot`] to the backend's shared
//!   [`PresentationLog`] and logs each region.
//! - `save()` writes the snapshot as pretty-printed JSON.
//!
//! # Example
//!
//! ```
//! use plot_lattice_render::{Command, RecordingBackend, Region, Surface, SurfaceFactory};
//!
//! let mut backend = RecordingBackend::new();
//! let mut surface = backend.create(1, 2).unwrap();
//!
//! surface
//!     .try_region_mut(0, 1)
//!     .unwrap()
//!     .invoke(&Command::new("plot").arg(vec![1, 2, 3]))
//!     .unwrap();
//!
//! assert!(surface.region(0, 0).unwrap().is_blank());
//! assert_eq!(surface.region(0, 1).unwrap().calls().len(), 1);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{RenderError, RenderResult};
use crate::logging::targets;
use crate::surface::{Region, Surface, SurfaceFactory};

/// Operations accepted by a default [`RecordingBackend`].
pub const DEFAULT_OPERATIONS: &[&str] = &[
    // Data
    "plot",
    "scatter",
    "bar",
    "barh",
    "hist",
    "imshow",
    "errorbar",
    "fill_between",
    "step",
    "stem",
    "pie",
    "boxplot",
    "contour",
    "contourf",
    // Annotation
    "text",
    "annotate",
    "axhline",
    "axvline",
    "legend",
    "grid",
    // Axes configuration
    "set_title",
    "set_xlabel",
    "set_ylabel",
    "set_xlim",
    "set_ylim",
    "set_xscale",
    "set_yscale",
];

/// Which operation names a recording region accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationSet {
    /// Any operation name is accepted.
    Any,
    /// Only the listed operation names are accepted.
    Only(BTreeSet<String>),
}

impl OperationSet {
    /// The [`DEFAULT_OPERATIONS`] allow-list.
    pub fn standard() -> Self {
        Self::Only(DEFAULT_OPERATIONS.iter().map(|s| s.to_string()).collect())
    }

    /// Whether `operation` is accepted.
    pub fn accepts(&self, operation: &str) -> bool {
        match self {
            OperationSet::Any => true,
            OperationSet::Only(names) => names.contains(operation),
        }
    }
}

impl Default for OperationSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// The recorded state of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    /// Row of the region.
    pub row: usize,
    /// Column of the region.
    pub col: usize,
    /// Commands executed on the region, in execution order.
    pub calls: Vec<Command>,
}

/// The recorded state of a whole surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Whether layout finalization ran before the snapshot was taken.
    pub tight_layout: bool,
    /// Every region, row-major.
    pub regions: Vec<RegionSnapshot>,
}

/// Shared log of every surface shown by a backend.
///
/// Cloning the log yields another handle to the same entries, so callers
/// can keep observing a backend after handing it to a figure.
#[derive(Debug, Clone, Default)]
pub struct PresentationLog {
    inner: Arc<Mutex<Vec<SurfaceSnapshot>>>,
}

impl PresentationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, snapshot: SurfaceSnapshot) {
        self.inner.lock().push(snapshot);
    }

    /// Number of surfaces shown so far.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether nothing has been shown yet.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// A copy of every shown surface, oldest first.
    pub fn entries(&self) -> Vec<SurfaceSnapshot> {
        self.inner.lock().clone()
    }

    /// The most recently shown surface.
    pub fn last(&self) -> Option<SurfaceSnapshot> {
        self.inner.lock().last().cloned()
    }
}

/// A region that records the commands executed on it.
#[derive(Debug, Clone)]
pub struct RecordingRegion {
    row: usize,
    col: usize,
    accepted: Arc<OperationSet>,
    calls: Vec<Command>,
}

impl RecordingRegion {
    /// Row of this region.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of this region.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Commands executed on this region, in execution order.
    pub fn calls(&self) -> &[Command] {
        &self.calls
    }

    /// Names of the executed operations, in execution order.
    pub fn operations(&self) -> Vec<&str> {
        self.calls.iter().map(Command::operation).collect()
    }

    fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            row: self.row,
            col: self.col,
            calls: self.calls.clone(),
        }
    }
}

impl Region for RecordingRegion {
    fn invoke(&mut self, command: &Command) -> RenderResult<()> {
        if !self.accepted.accepts(command.operation()) {
            return Err(RenderError::UnknownOperation {
                operation: command.operation().to_string(),
            });
        }
        tracing::trace!(
            target: targets::RECORDING,
            row = self.row,
            col = self.col,
            "{}",
            command
        );
        self.calls.push(command.clone());
        Ok(())
    }

    fn is_blank(&self) -> bool {
        self.calls.is_empty()
    }
}

/// A grid of [`RecordingRegion`]s.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    rows: usize,
    cols: usize,
    regions: Vec<RecordingRegion>,
    tight_layout: bool,
    log: PresentationLog,
}

impl RecordingSurface {
    /// Whether layout finalization has run.
    pub fn is_layout_finalized(&self) -> bool {
        self.tight_layout
    }

    /// All regions, row-major.
    pub fn regions(&self) -> &[RecordingRegion] {
        &self.regions
    }

    /// Capture the current state of the surface.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            rows: self.rows,
            cols: self.cols,
            tight_layout: self.tight_layout,
            regions: self.regions.iter().map(RecordingRegion::snapshot).collect(),
        }
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl Surface for RecordingSurface {
    type Region = RecordingRegion;

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn region(&self, row: usize, col: usize) -> Option<&RecordingRegion> {
        self.index(row, col).map(|i| &self.regions[i])
    }

    fn region_mut(&mut self, row: usize, col: usize) -> Option<&mut RecordingRegion> {
        self.index(row, col).map(|i| &mut self.regions[i])
    }

    fn tight_layout(&mut self) -> RenderResult<()> {
        self.tight_layout = true;
        Ok(())
    }

    fn show(&mut self) -> RenderResult<()> {
        for region in &self.regions {
            tracing::info!(
                target: targets::RECORDING,
                row = region.row,
                col = region.col,
                calls = region.calls.len(),
                "region"
            );
        }
        self.log.push(self.snapshot());
        Ok(())
    }

    fn save(&mut self, destination: &Path) -> RenderResult<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        fs::write(destination, json)?;
        tracing::debug!(
            target: targets::RECORDING,
            path = %destination.display(),
            "saved surface"
        );
        Ok(())
    }
}

/// A [`SurfaceFactory`] producing [`RecordingSurface`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    accepted: Arc<OperationSet>,
    log: PresentationLog,
    created: usize,
}

impl RecordingBackend {
    /// Create a backend accepting the [`DEFAULT_OPERATIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend accepting any operation name.
    pub fn permissive() -> Self {
        Self::with_operations(OperationSet::Any)
    }

    /// Create a backend with a custom set of accepted operations.
    pub fn with_operations(accepted: OperationSet) -> Self {
        Self {
            accepted: Arc::new(accepted),
            ..Self::default()
        }
    }

    /// The log of surfaces shown through this backend.
    pub fn presentations(&self) -> PresentationLog {
        self.log.clone()
    }

    /// Number of surfaces this backend has created.
    pub fn surfaces_created(&self) -> usize {
        self.created
    }
}

impl SurfaceFactory for RecordingBackend {
    type Surface = RecordingSurface;

    fn create(&mut self, rows: usize, cols: usize) -> RenderResult<RecordingSurface> {
        if rows == 0 || cols == 0 {
            return Err(RenderError::InvalidDimensions { rows, cols });
        }
        let regions = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| RecordingRegion {
                row,
                col,
                accepted: Arc::clone(&self.accepted),
                calls: Vec::new(),
            })
            .collect();
        self.created += 1;
        tracing::debug!(
            target: targets::RECORDING,
            rows,
            cols,
            "created surface"
        );
        Ok(RecordingSurface {
            rows,
            cols,
            regions,
            tight_layout: false,
            log: self.log.clone(),
        })
    }
}

static_assertions::assert_impl_all!(RecordingBackend: Send, Sync);
static_assertions::assert_impl_all!(RecordingSurface: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_row_major_regions() {
        let mut backend = RecordingBackend::new();
        let surface = backend.create(2, 3).unwrap();

        assert_eq!(Surface::dimensions(&surface), (2, 3));
        let positions: Vec<_> = surface.regions().iter().map(|r| (r.row(), r.col())).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert!(surface.region(2, 0).is_none());
        assert!(surface.region(0, 3).is_none());
        assert_eq!(backend.surfaces_created(), 1);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut backend = RecordingBackend::new();
        assert!(matches!(
            backend.create(3, 0),
            Err(RenderError::InvalidDimensions { rows: 3, cols: 0 })
        ));
        assert_eq!(backend.surfaces_created(), 0);
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let mut surface = RecordingBackend::new().create(1, 1).unwrap();
        let region = surface.try_region_mut(0, 0).unwrap();

        let err = region.invoke(&Command::new("plott")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownOperation { ref operation } if operation == "plott"));
        assert!(region.is_blank());
    }

    #[test]
    fn test_permissive_accepts_anything() {
        let mut surface = RecordingBackend::permissive().create(1, 1).unwrap();
        let region = surface.try_region_mut(0, 0).unwrap();
        region.invoke(&Command::new("set_facecolor").arg("k")).unwrap();
        assert_eq!(region.operations(), vec!["set_facecolor"]);
    }

    #[test]
    fn test_try_region_mut_out_of_bounds() {
        let mut surface = RecordingBackend::new().create(1, 1).unwrap();
        assert!(matches!(
            surface.try_region_mut(0, 1),
            Err(RenderError::RegionOutOfBounds { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_show_appends_to_shared_log() {
        let mut backend = RecordingBackend::new();
        let log = backend.presentations();

        let mut surface = backend.create(1, 1).unwrap();
        surface
            .try_region_mut(0, 0)
            .unwrap()
            .invoke(&Command::new("plot").arg(vec![1, 2]))
            .unwrap();
        surface.tight_layout().unwrap();
        surface.show().unwrap();
        drop(surface);

        assert_eq!(log.len(), 1);
        let shown = log.last().unwrap();
        assert!(shown.tight_layout);
        assert_eq!(shown.regions[0].calls, vec![Command::new("plot").arg(vec![1, 2])]);
    }
}
