//! Post-hoc structural validation of assembled surfaces.
//!
//! A [`Validator`] inspects a surface after every recorded command has been
//! replayed on it. It never sees the recorded commands themselves, only the
//! resulting surface.
//!
//! # Strictness
//!
//! Every validator receives a `strict` flag:
//!
//! - `strict = true`: problems are returned as [`RenderError::Validation`]
//! - `strict = false`: problems are logged as warnings and validation passes
//!
//! # Built-in Validators
//!
//! - [`StructuralValidator`]: flags regions nothing was drawn on
//! - [`AcceptAll`]: never reports anything

use std::fmt;
use std::sync::Arc;

use crate::error::{RenderError, RenderResult};
use crate::logging::targets;
use crate::surface::SurfaceInspect;

/// A single structural problem found on a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Nothing was drawn on the region at `(row, col)`.
    BlankRegion { row: usize, col: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::BlankRegion { row, col } => {
                write!(f, "region ({row}, {col}) has nothing drawn on it")
            }
        }
    }
}

/// The collected issues of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// The issues found, in discovery order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Turn the report into a result according to `strict`.
    ///
    /// In strict mode a non-clean report becomes an error; otherwise every
    /// issue is logged at `warn` and the report is accepted.
    pub fn into_result(self, strict: bool) -> RenderResult<()> {
        if self.is_clean() {
            return Ok(());
        }
        if strict {
            return Err(RenderError::Validation(self));
        }
        for issue in &self.issues {
            tracing::warn!(target: targets::VALIDATOR, "{}", issue);
        }
        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "no issues"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

/// Trait for post-hoc surface validators.
///
/// Validators must be `Send + Sync` so figures holding one stay `Send`.
pub trait Validator: Send + Sync {
    /// Inspect `surface` and raise or warn about structural problems.
    fn validate(&self, surface: &dyn SurfaceInspect, strict: bool) -> RenderResult<()>;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, surface: &dyn SurfaceInspect, strict: bool) -> RenderResult<()> {
        (**self).validate(surface, strict)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, surface: &dyn SurfaceInspect, strict: bool) -> RenderResult<()> {
        (**self).validate(surface, strict)
    }
}

/// Flags every region of the surface that nothing was drawn on.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Create a new structural validator.
    pub fn new() -> Self {
        Self
    }

    /// Collect the issues of `surface` without applying strictness.
    pub fn inspect(&self, surface: &dyn SurfaceInspect) -> ValidationReport {
        let (rows, cols) = surface.dimensions();
        let mut report = ValidationReport::new();
        for row in 0..rows {
            for col in 0..cols {
                if surface.is_region_blank(row, col) {
                    report.push(ValidationIssue::BlankRegion { row, col });
                }
            }
        }
        report
    }
}

impl Validator for StructuralValidator {
    fn validate(&self, surface: &dyn SurfaceInspect, strict: bool) -> RenderResult<()> {
        self.inspect(surface).into_result(strict)
    }
}

/// A validator that accepts every surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _surface: &dyn SurfaceInspect, _strict: bool) -> RenderResult<()> {
        Ok(())
    }
}
