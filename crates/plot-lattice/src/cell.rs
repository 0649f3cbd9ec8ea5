//! Command cells: one deferred command bound to one grid coordinate.

use std::fmt;

use plot_lattice_render::Command;

use crate::coordinate::Coordinate;
use crate::logging::targets;

/// A grid cell holding at most one deferred [`Command`].
///
/// Cells are created by a [`Figure`](crate::Figure) when a coordinate is
/// requested and stay owned by it. Recording a second command replaces the
/// first. A cell that never receives a command is skipped during replay.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandCell {
    coordinate: Coordinate,
    command: Option<Command>,
}

impl CommandCell {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            command: None,
        }
    }

    /// Record `command`, replacing any previously recorded one.
    pub fn record(&mut self, command: Command) {
        if let Some(previous) = &self.command {
            tracing::trace!(
                target: targets::FIGURE,
                coordinate = %self.coordinate,
                previous = previous.operation(),
                "overwriting recorded command"
            );
        }
        self.command = Some(command);
    }

    /// The coordinate this cell was created for.
    #[inline]
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// The recorded command, if any.
    #[inline]
    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    /// The recorded operation name, if any.
    pub fn operation(&self) -> Option<&str> {
        self.command.as_ref().map(Command::operation)
    }

    /// Whether a command has been recorded.
    #[inline]
    pub fn is_recorded(&self) -> bool {
        self.command.is_some()
    }
}

impl fmt::Display for CommandCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<CommandCell {}: {}>",
            self.coordinate,
            self.operation().unwrap_or("empty")
        )
    }
}

static_assertions::assert_impl_all!(CommandCell: Send, Sync);
