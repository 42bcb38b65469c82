// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements a Sudoku engine that solves puzzles by pure
//! deduction, without any guessing or backtracking. It supports the
//! following key features:
//!
//! * Parsing puzzles from digit row strings and printing grids
//! * Tracking the candidate values of every cell as a bit set that only
//! ever shrinks
//! * Event-driven propagation: every cell that becomes known is queued and
//! its value is then removed from all peers in its row, column, and block
//! * Two elimination strategies, hidden singles (exclusion) and naked
//! pairs, which run until no further progress is possible
//! * Validity checking that names the group and value of the first
//! duplicate, and a full trace of solving events for diagnostics
//!
//! If deduction stalls before the grid is complete, the engine stops and
//! reports the partial state. Unsolvable puzzles surface as errors instead
//! of wrong grids.
//!
//! # Parsing and printing puzzles
//!
//! A puzzle is given as 9 strings of 9 digits each, where `'0'` marks an
//! unknown cell. See [SudokuGrid::from_rows] for the exact format.
//!
//! ```
//! use sudoku_deduction::SudokuGrid;
//!
//! let grid = SudokuGrid::from_rows(&[
//!     "004000918",
//!     "000400000",
//!     "100200300",
//!     "807620000",
//!     "031000650",
//!     "000037802",
//!     "003004005",
//!     "000002000",
//!     "562000100"
//! ]).unwrap();
//!
//! assert_eq!(Some(4), grid.get(0, 2).unwrap().value());
//! assert_eq!(None, grid.get(0, 0).unwrap().value());
//! println!("{}", grid);
//! ```
//!
//! # Solving
//!
//! [SudokuGrid::solve] runs the standard strategy schedule to its fixpoint.
//! The puzzle above happens to be solvable by pure elimination.
//!
//! ```
//! use sudoku_deduction::SudokuGrid;
//! use sudoku_deduction::solver::Solution;
//!
//! let mut grid = SudokuGrid::from_rows(&[
//!     "004000918",
//!     "000400000",
//!     "100200300",
//!     "807620000",
//!     "031000650",
//!     "000037802",
//!     "003004005",
//!     "000002000",
//!     "562000100"
//! ]).unwrap();
//!
//! assert_eq!(Solution::Complete, grid.solve().unwrap());
//! assert_eq!("624753918", grid.to_rows()[0]);
//! ```
//!
//! # Inspecting the deduction trace
//!
//! Every cell that becomes known leaves an [Event](event::Event) in the
//! grid's log: clue placements, strategy assignments, and self-deductions
//! alike. The log is append-only and ordered, which makes it suitable for
//! rendering a step-by-step account of the solve.
//!
//! ```
//! use sudoku_deduction::SudokuGrid;
//! use sudoku_deduction::event::{EventKind, SolvePhase};
//!
//! let mut grid = SudokuGrid::new();
//! grid.assign(0, 0, 1).unwrap();
//!
//! let events = grid.events();
//! assert_eq!(1, events.len());
//! assert_eq!(EventKind::Assigned, events[0].kind());
//! assert_eq!(SolvePhase::Init, events[0].phase());
//! ```

pub mod cell;
pub mod error;
pub mod event;
pub mod solver;
pub mod table;
pub mod util;

#[cfg(test)]
mod fix_tests;


use cell::Cell;
use error::{
    PuzzleParseError,
    PuzzleParseResult,
    SudokuError,
    SudokuResult
};
use event::{Event, SolvePhase};
use solver::{DeductiveSolver, Solution};
use table::Table;
use util::BitSet;

use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

/// The number of rows, columns, blocks, and distinct values of the puzzle.
pub const SIZE: usize = 9;

/// The side length of one of the square blocks of the puzzle.
pub const BLOCK_SIZE: usize = 3;

/// Identifies one of the 27 constraint groups of the grid. The contained
/// index is the row or column number, or the block number counted in
/// row-major order starting at the top-left block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupId {

    /// One of the 9 rows, identified by its row index.
    Row(usize),

    /// One of the 9 columns, identified by its column index.
    Column(usize),

    /// One of the 9 blocks, identified by its row-major block index.
    Block(usize)
}

/// One constraint group: a row, column, or block whose 9 cells must contain
/// every value exactly once. A group stores the coordinates of its cells,
/// not the cells themselves, so the grid remains the single owner of all
/// cell state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Group {
    id: GroupId,
    positions: [(usize, usize); SIZE]
}

impl Group {

    pub(crate) fn row(row: usize) -> Group {
        let mut positions = [(0, 0); SIZE];

        for (column, position) in positions.iter_mut().enumerate() {
            *position = (row, column);
        }

        Group {
            id: GroupId::Row(row),
            positions
        }
    }

    pub(crate) fn column(column: usize) -> Group {
        let mut positions = [(0, 0); SIZE];

        for (row, position) in positions.iter_mut().enumerate() {
            *position = (row, column);
        }

        Group {
            id: GroupId::Column(column),
            positions
        }
    }

    pub(crate) fn block(block: usize) -> Group {
        let base_row = (block / BLOCK_SIZE) * BLOCK_SIZE;
        let base_column = (block % BLOCK_SIZE) * BLOCK_SIZE;
        let mut positions = [(0, 0); SIZE];

        for (index, position) in positions.iter_mut().enumerate() {
            *position = (base_row + index / BLOCK_SIZE,
                base_column + index % BLOCK_SIZE);
        }

        Group {
            id: GroupId::Block(block),
            positions
        }
    }

    pub(crate) fn block_containing(row: usize, column: usize) -> Group {
        Group::block((row / BLOCK_SIZE) * BLOCK_SIZE + column / BLOCK_SIZE)
    }

    /// The identity of this group, naming its family and index.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The coordinates of the 9 cells of this group as `(row, column)`
    /// pairs.
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.positions
    }

    /// Returns an iterator over the coordinates of the cells of this group
    /// as `(row, column)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions.iter().copied()
    }

    /// Indicates whether the cell at the given coordinates belongs to this
    /// group.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.positions.iter().any(|&position| position == (row, column))
    }
}

/// The grid of a Sudoku puzzle: 81 [Cell]s together with the 27 constraint
/// groups they participate in, the FIFO queue of propagation events, and
/// the append-only event log.
///
/// Cells are addressed by `(row, column)` with both coordinates in
/// `[0, 9)`, row 0 at the top and column 0 on the left. The grid is the
/// single owner of all solving state; there is no global state anywhere in
/// this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudokuGrid {
    cells: Table<Cell>,
    groups: Vec<Group>,
    queue: VecDeque<Event>,
    log: Vec<Event>,
    phase: SolvePhase
}

fn to_char(cell: &Cell) -> char {
    if let Some(value) = cell.value() {
        (b'0' + value as u8) as char
    }
    else {
        ' '
    }
}

fn to_digit_char(cell: &Cell) -> char {
    if let Some(value) = cell.value() {
        (b'0' + value as u8) as char
    }
    else {
        '0'
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.get(y, x).unwrap()), ' ', '║',
        true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let top_row = top_row();
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();
        let bottom_row = bottom_row();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row.as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row.as_str())?;
        Ok(())
    }
}

fn compute_groups() -> Vec<Group> {
    let mut groups = Vec::with_capacity(3 * SIZE);

    for row in 0..SIZE {
        groups.push(Group::row(row));
    }

    for column in 0..SIZE {
        groups.push(Group::column(column));
    }

    for block in 0..SIZE {
        groups.push(Group::block(block));
    }

    groups
}

impl SudokuGrid {

    /// Creates a new grid in which every cell is unknown and holds all 9
    /// candidates. The 27 constraint groups are computed here and cached
    /// for the lifetime of the grid.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: Table::from_fn(SIZE, SIZE, Cell::new),
            groups: compute_groups(),
            queue: VecDeque::new(),
            log: Vec::new(),
            phase: SolvePhase::Init
        }
    }

    /// Parses a puzzle from its row strings. The input must contain exactly
    /// 9 rows of exactly 9 characters, each a digit from `'0'` to `'9'`,
    /// where `'0'` marks an unknown cell. The digit in row `i`, position
    /// `j` is assigned to the cell at `(i, j)`.
    ///
    /// Every clue is placed with [SudokuGrid::assign], so the event log of
    /// the returned grid holds one event per clue, tagged with
    /// [SolvePhase::Init]. Propagation has *not* run yet; all non-clue
    /// cells still hold all 9 candidates.
    ///
    /// Note that no validity check is performed here. It is perfectly legal
    /// to parse a puzzle with duplicate clues; the duplicate surfaces later
    /// from [SudokuGrid::check_validity] or [SudokuGrid::solve].
    ///
    /// # Errors
    ///
    /// * `PuzzleParseError::WrongNumberOfRows`: If `rows` does not have
    /// exactly 9 elements.
    /// * `PuzzleParseError::WrongRowLength`: If some row does not have
    /// exactly 9 characters.
    /// * `PuzzleParseError::InvalidCharacter`: If some character is not a
    /// digit from `'0'` to `'9'`.
    pub fn from_rows(rows: &[&str]) -> PuzzleParseResult<SudokuGrid> {
        if rows.len() != SIZE {
            return Err(PuzzleParseError::WrongNumberOfRows);
        }

        let mut clues = Vec::new();

        for (row, row_str) in rows.iter().enumerate() {
            let digits: Vec<char> = row_str.chars().collect();

            if digits.len() != SIZE {
                return Err(PuzzleParseError::WrongRowLength);
            }

            for (column, digit) in digits.into_iter().enumerate() {
                match digit.to_digit(10) {
                    Some(0) => { },
                    Some(value) => clues.push((row, column, value as usize)),
                    None => return Err(PuzzleParseError::InvalidCharacter)
                }
            }
        }

        let mut grid = SudokuGrid::new();

        for (row, column, value) in clues {
            grid.assign(row, column, value).unwrap();
        }

        Ok(grid)
    }

    /// Parses a puzzle from a single string holding the 9 rows separated by
    /// line breaks. See [SudokuGrid::from_rows] for the format of the rows
    /// and the errors that can occur.
    ///
    /// # Errors
    ///
    /// Any specialization of `PuzzleParseError` (see that documentation).
    pub fn parse(text: &str) -> PuzzleParseResult<SudokuGrid> {
        let rows: Vec<&str> = text.lines().collect();
        SudokuGrid::from_rows(&rows)
    }

    /// Gets a reference to the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `row`: The row of the desired cell. Must be in the range `[0, 9)`.
    /// * `column`: The column of the desired cell. Must be in the range
    /// `[0, 9)`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get(&self, row: usize, column: usize) -> SudokuResult<&Cell> {
        self.cells.get(row, column)
    }

    /// Gets references to the 9 cells of the given row, ordered by column.
    ///
    /// # Errors
    ///
    /// If `row` is not in the range `[0, 9)`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get_row(&self, row: usize) -> SudokuResult<Vec<&Cell>> {
        self.cells.row(row)
    }

    /// Gets references to the 9 cells of the given column, ordered by row.
    ///
    /// # Errors
    ///
    /// If `column` is not in the range `[0, 9)`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get_column(&self, column: usize) -> SudokuResult<Vec<&Cell>> {
        self.cells.column(column)
    }

    /// Gets references to the 9 cells of the 3×3 block containing the cell
    /// at the specified position, in row-major order. The block is found by
    /// flooring both coordinates to the closest multiple of 3.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, 9)`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn sub_area(&self, row: usize, column: usize)
            -> SudokuResult<Vec<&Cell>> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        let base_row = (row / BLOCK_SIZE) * BLOCK_SIZE;
        let base_column = (column / BLOCK_SIZE) * BLOCK_SIZE;
        self.cells.window(base_row, base_column, BLOCK_SIZE, BLOCK_SIZE)
    }

    /// The 27 constraint groups of the grid: the 9 rows, then the 9
    /// columns, then the 9 blocks. The groups are computed at construction
    /// time; this accessor only hands out the cached slice.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The 3 groups containing the cell at the specified position, in the
    /// order block, row, column. These are recomputed on every call.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, 9)`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn groups_of(&self, row: usize, column: usize)
            -> SudokuResult<[Group; 3]> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        Ok([
            Group::block_containing(row, column),
            Group::row(row),
            Group::column(column)
        ])
    }

    fn record(&mut self, mut event: Event) {
        event.set_phase(self.phase);
        self.log.push(event);
        self.queue.push_back(event);
    }

    pub(crate) fn set_phase(&mut self, phase: SolvePhase) {
        self.phase = phase;
    }

    /// Forces the cell at the specified position to the given value, as
    /// happens for every clue of a parsed puzzle and whenever a strategy
    /// fires. The resulting event, if any, is recorded in the queue and the
    /// log. Note that the value is *not* propagated to the cell's peers
    /// here; that happens when [SudokuGrid::propagate] drains the queue.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` or `column` are not in the
    /// range `[0, 9)`.
    /// * `SudokuError::InvalidNumber`: If `value` is 0 or greater than 9.
    /// * `SudokuError::Contradiction`: If the cell already holds a
    /// different value.
    pub fn assign(&mut self, row: usize, column: usize, value: usize)
            -> SudokuResult<()> {
        let event = self.cells.get_mut(row, column)?.assign(value)?;

        if let Some(event) = event {
            self.record(event);
        }

        Ok(())
    }

    /// Rules out the given value for the cell at the specified position. If
    /// this collapses the cell's candidates to a single value, the cell
    /// deduces that value and the resulting event is recorded in the queue
    /// and the log.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` or `column` are not in the
    /// range `[0, 9)`.
    /// * `SudokuError::InvalidNumber`: If `value` is 0 or greater than 9.
    /// * `SudokuError::Contradiction`: If no candidate remains for the
    /// cell.
    pub fn clear_candidate(&mut self, row: usize, column: usize,
            value: usize) -> SudokuResult<()> {
        let event = self.cells.get_mut(row, column)?.clear(value)?;

        if let Some(event) = event {
            self.record(event);
        }

        Ok(())
    }

    /// Rules out all given values for the cell at the specified position,
    /// like repeated calls to [SudokuGrid::clear_candidate].
    ///
    /// # Errors
    ///
    /// As for [SudokuGrid::clear_candidate].
    pub fn clear_candidates(&mut self, row: usize, column: usize,
            values: &[usize]) -> SudokuResult<()> {
        let event = self.cells.get_mut(row, column)?.clear_values(values)?;

        if let Some(event) = event {
            self.record(event);
        }

        Ok(())
    }

    /// Removes the value of the cell at the specified position from the
    /// candidates of every other cell in the cell's block, row, and column.
    /// If the cell is unknown, nothing happens. Peers that collapse to a
    /// single candidate deduce their value and their events are enqueued;
    /// the cascade is *not* followed recursively but processed by later
    /// queue drains, breadth-first.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` or `column` are not in the
    /// range `[0, 9)`.
    /// * `SudokuError::Contradiction`: If removing the value leaves a peer
    /// without candidates.
    pub fn propagate_from(&mut self, row: usize, column: usize)
            -> SudokuResult<()> {
        let value = match self.get(row, column)?.value() {
            Some(value) => value,
            None => return Ok(())
        };
        let groups = self.groups_of(row, column)?;

        for group in &groups {
            for (peer_row, peer_column) in group.iter() {
                if peer_row == row && peer_column == column {
                    continue;
                }

                let event = self.cells
                    .get_mut(peer_row, peer_column)?
                    .clear(value)?;

                if let Some(event) = event {
                    self.record(event);
                }
            }
        }

        Ok(())
    }

    /// Drains the event queue, calling [SudokuGrid::propagate_from] for the
    /// cell of every event, strictly in FIFO order. Since propagation can
    /// enqueue further events, cascaded events line up behind the pending
    /// ones and the drain continues until the queue is truly empty. Events
    /// recorded during the drain are tagged with [SolvePhase::Assert].
    ///
    /// Returns `false` if the queue was already empty when called (nothing
    /// to do) and `true` otherwise.
    ///
    /// # Errors
    ///
    /// `SudokuError::Contradiction`, if propagation leaves some cell
    /// without candidates.
    pub fn propagate(&mut self) -> SudokuResult<bool> {
        if self.queue.is_empty() {
            return Ok(false);
        }

        self.phase = SolvePhase::Assert;

        while let Some(event) = self.queue.pop_front() {
            self.propagate_from(event.row(), event.column())?;
        }

        Ok(true)
    }

    /// Checks that no value appears twice within any of the 27 groups,
    /// using a fresh tracking set per group. Unknown cells are skipped;
    /// only assigned and deduced values count. This method can be called at
    /// any time and does not change the grid, so repeated calls on an
    /// unchanged grid yield the same result.
    ///
    /// # Errors
    ///
    /// `SudokuError::DuplicateValue` with the offending group and value, if
    /// some value appears twice within one group. The first duplicate found
    /// is reported, scanning rows, then columns, then blocks.
    pub fn check_validity(&self) -> SudokuResult<()> {
        for group in &self.groups {
            let mut seen = BitSet::new(SIZE);

            for (row, column) in group.iter() {
                if let Some(value) = self.cells.get(row, column)?.value() {
                    if seen.get(value - 1)? {
                        return Err(SudokuError::DuplicateValue {
                            group: group.id(),
                            value
                        });
                    }

                    seen.set(value - 1, true)?;
                }
            }
        }

        Ok(())
    }

    /// Solves as much of this puzzle as pure deduction allows, using the
    /// standard strategy schedule (naked pairs, then exclusion, repeated to
    /// a fixpoint). See [DeductiveSolver] for the loop itself. The grid is
    /// modified in place; if the result is [Solution::Partial], it holds
    /// all progress that could be made.
    ///
    /// # Errors
    ///
    /// * `SudokuError::DuplicateValue`: If the puzzle contains the same
    /// value twice within one group.
    /// * `SudokuError::Contradiction`: If deduction proves the puzzle
    /// unsolvable.
    pub fn solve(&mut self) -> SudokuResult<Solution> {
        DeductiveSolver::standard().solve(self)
    }

    /// Indicates whether every cell of this grid is known. A complete grid
    /// that passes [SudokuGrid::check_validity] is a solution.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_known)
    }

    /// Indicates whether no cell of this grid is known.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(Cell::is_known)
    }

    /// Counts the cells of this grid that are known, either from a clue or
    /// by deduction.
    pub fn count_known(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_known()).count()
    }

    /// The append-only log of all events recorded so far, in the order they
    /// occurred. Unlike the propagation queue, the log is never consumed;
    /// it grows for the life of the grid and allows a renderer to display a
    /// trace of the solving process.
    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// Renders this grid in the same format that [SudokuGrid::from_rows]
    /// parses: 9 strings of 9 digits, with `'0'` for unknown cells.
    ///
    /// ```
    /// use sudoku_deduction::SudokuGrid;
    ///
    /// let rows = [
    ///     "004000918",
    ///     "000400000",
    ///     "100200300",
    ///     "807620000",
    ///     "031000650",
    ///     "000037802",
    ///     "003004005",
    ///     "000002000",
    ///     "562000100"
    /// ];
    /// let grid = SudokuGrid::from_rows(&rows).unwrap();
    ///
    /// assert_eq!(rows.to_vec(), grid.to_rows());
    /// ```
    pub fn to_rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(SIZE);

        for row in 0..SIZE {
            let mut digits = String::with_capacity(SIZE);

            for column in 0..SIZE {
                digits.push(to_digit_char(self.get(row, column).unwrap()));
            }

            rows.push(digits);
        }

        rows
    }
}
