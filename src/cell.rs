//! This module contains the definition of a single puzzle [Cell]: its
//! assigned value, if any, and the set of values it can still hold. Cells
//! deduce their own value once only one candidate remains; the resulting
//! [Event] is returned to the caller, which is how the grid learns that it
//! has to propagate.

use crate::SIZE;
use crate::error::{SudokuError, SudokuResult};
use crate::event::{Event, EventKind};
use crate::util::BitSet;

use std::fmt::{self, Display, Formatter};

/// One square of the puzzle. A cell is either known, in which case it holds
/// a value between 1 and 9, or unknown, in which case it holds the set of
/// candidate values not yet ruled out. Candidates only ever shrink; once a
/// value is present it never changes and the candidate set is no longer
/// meaningful.
///
/// Mutation happens through [Cell::assign] (a clue or a strategy forces a
/// value) and [Cell::clear] (a value is ruled out). Both report the
/// [Event], if any, that the mutation caused; clearing the second-to-last
/// candidate makes the cell deduce the last one as its value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    row: usize,
    column: usize,
    value: Option<usize>,
    candidates: BitSet
}

fn check_number(number: usize) -> SudokuResult<()> {
    if number == 0 || number > SIZE {
        Err(SudokuError::InvalidNumber)
    }
    else {
        Ok(())
    }
}

impl Cell {

    /// Creates a new unknown cell at the given coordinates for which every
    /// value is still a candidate.
    pub(crate) fn new(row: usize, column: usize) -> Cell {
        Cell {
            row,
            column,
            value: None,
            candidates: BitSet::filled(SIZE)
        }
    }

    /// The row of this cell in its grid.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The column of this cell in its grid.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The value of this cell, or `None` while the cell is unknown.
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    /// Indicates whether this cell has a value, assigned or deduced.
    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }

    /// Indicates whether this cell can still hold the given value. For a
    /// known cell this is only the case for the value itself; for an
    /// unknown cell, for every remaining candidate. Values outside 1 to 9
    /// are never possible.
    pub fn is_possible(&self, value: usize) -> bool {
        if let Some(current) = self.value {
            current == value
        }
        else if value == 0 || value > SIZE {
            false
        }
        else {
            self.candidates.get(value - 1).unwrap_or(false)
        }
    }

    /// Returns the still-possible values of this cell in ascending order.
    /// For a known cell the result is empty, since by contract the value is
    /// consulted instead.
    pub fn candidates(&self) -> Vec<usize> {
        if self.value.is_some() {
            Vec::new()
        }
        else {
            self.candidates.iter().map(|index| index + 1).collect()
        }
    }

    /// Returns the candidate set of this cell as a [BitSet], where the bit
    /// with index `v - 1` represents the value `v`. The matched-pairs
    /// strategy compares these sets directly.
    pub fn candidate_set(&self) -> &BitSet {
        &self.candidates
    }

    /// Forces this cell to the given value, as happens for puzzle clues and
    /// when a strategy fires. The candidate set is reduced to the value
    /// alone. Returns the [EventKind::Assigned] event for the grid to
    /// record, or `None` if the cell already held the same value.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidNumber`: If `value` is 0 or greater than 9.
    /// * `SudokuError::Contradiction`: If the cell already holds a
    /// different value.
    pub fn assign(&mut self, value: usize) -> SudokuResult<Option<Event>> {
        check_number(value)?;

        if let Some(current) = self.value {
            return if current == value {
                Ok(None)
            }
            else {
                Err(SudokuError::Contradiction {
                    row: self.row,
                    column: self.column
                })
            };
        }

        self.value = Some(value);
        let mut candidates = BitSet::new(SIZE);
        candidates.set(value - 1, true)?;
        self.candidates = candidates;

        Ok(Some(Event::new(self.row, self.column, EventKind::Assigned,
            value)))
    }

    /// Rules out the given value for this cell. On a known cell this is a
    /// no-op, since peers of a known cell are re-cleared constantly during
    /// propagation. If the last clear left exactly one candidate, the cell
    /// takes it as its value and the [EventKind::Solved] event is returned
    /// for the grid to record.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidNumber`: If `value` is 0 or greater than 9.
    /// * `SudokuError::Contradiction`: If no candidate remains after the
    /// clear, that is, the puzzle is unsolvable.
    pub fn clear(&mut self, value: usize) -> SudokuResult<Option<Event>> {
        check_number(value)?;

        if self.value.is_some() {
            return Ok(None);
        }

        if !self.candidates.set(value - 1, false)? {
            return Ok(None);
        }

        self.deduce()
    }

    /// Rules out all given values for this cell, like repeated calls to
    /// [Cell::clear]. At most one event can result, since the first
    /// collapse determines the cell and later clears become no-ops.
    ///
    /// # Errors
    ///
    /// As for [Cell::clear].
    pub fn clear_values(&mut self, values: &[usize])
            -> SudokuResult<Option<Event>> {
        let mut event = None;

        for &value in values {
            if let Some(solved) = self.clear(value)? {
                event = Some(solved);
            }
        }

        Ok(event)
    }

    fn deduce(&mut self) -> SudokuResult<Option<Event>> {
        if self.candidates.is_empty() {
            return Err(SudokuError::Contradiction {
                row: self.row,
                column: self.column
            });
        }

        if let Some(index) = self.candidates.single() {
            let value = index + 1;
            self.value = Some(value);
            return Ok(Some(Event::new(self.row, self.column,
                EventKind::Solved, value)));
        }

        Ok(None)
    }

    /// Compares the knowledge state of two cells independently of their
    /// coordinates: equal values if both are known, equal candidate sets if
    /// both are unknown, different otherwise. Intended for display and
    /// grouping, not for ordering.
    pub fn same_state(&self, other: &Cell) -> bool {
        match (self.value, other.value) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            (None, None) => self.candidates == other.candidates,
            _ => false
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.value {
            write!(f, "{}", value)
        }
        else {
            let candidates = self.candidates()
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join("/");
            write!(f, "?{}", candidates)
        }
    }
}
