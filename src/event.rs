//! This module defines the events that cells emit while a puzzle is being
//! solved. The grid records every [Event] twice: once in the FIFO queue that
//! drives propagation and once in an append-only log that renderers can read
//! to display a trace of the solving process.

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The way in which a cell became known.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EventKind {

    /// The value was forced onto the cell from outside, either as a puzzle
    /// clue or by a strategy.
    Assigned,

    /// The cell deduced its own value because its candidate set collapsed to
    /// a single remaining value.
    Solved
}

/// The phase of the solving process during which an event was recorded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SolvePhase {

    /// Clue placement, before any deduction has run.
    Init,

    /// Draining the event queue, that is, removing known values from the
    /// peers of known cells.
    Assert,

    /// The hidden-single strategy, which assigns a value that no other cell
    /// of some group can hold.
    Exclusive,

    /// The matched-pairs strategy, which strips pair values from the other
    /// cells of a group.
    Pairs
}

/// An immutable record of one cell becoming known. Events are created by
/// cell mutation and recorded by the grid, which stamps the current
/// [SolvePhase] onto them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Event {
    row: usize,
    column: usize,
    kind: EventKind,
    value: usize,
    phase: SolvePhase
}

impl Event {

    pub(crate) fn new(row: usize, column: usize, kind: EventKind,
            value: usize) -> Event {
        Event {
            row,
            column,
            kind,
            value,
            phase: SolvePhase::Init
        }
    }

    pub(crate) fn set_phase(&mut self, phase: SolvePhase) {
        self.phase = phase;
    }

    /// The row of the cell that became known.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The column of the cell that became known.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Whether the cell was assigned from outside or deduced its own value.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The value the cell took.
    pub fn value(&self) -> usize {
        self.value
    }

    /// The phase of the solving process in which the event was recorded.
    pub fn phase(&self) -> SolvePhase {
        self.phase
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Assigned => write!(f, "ASSIGNED"),
            EventKind::Solved => write!(f, "SOLVED")
        }
    }
}

impl Display for SolvePhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolvePhase::Init => write!(f, "INIT"),
            SolvePhase::Assert => write!(f, "ASSERT"),
            SolvePhase::Exclusive => write!(f, "EXCLUSIVE"),
            SolvePhase::Pairs => write!(f, "PAIRS")
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}, ({},{}): {} [{}]", self.kind, self.row, self.column,
            self.value, self.phase)
    }
}
