//! This module contains some error and result definitions used in this crate.

use crate::GroupId;
use crate::util::BitSetError;

/// Errors that can occur while manipulating or solving a Sudoku grid. This
/// does not include errors that occur when parsing puzzle input, see
/// [PuzzleParseError] for that.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the dimensions of some provided data do not match the
    /// container it is written to, such as a row vector whose length differs
    /// from the width of the table.
    InvalidDimensions,

    /// Indicates that some number is invalid as a cell value. This is the
    /// case if it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the Sudoku grid. This is the case if either is greater than or equal
    /// to 9.
    OutOfBounds,

    /// Indicates that the same value is assigned to two cells of one
    /// constraint group, that is, the puzzle is invalid as given.
    DuplicateValue {

        /// The group in which the value appears twice.
        group: GroupId,

        /// The value that appears twice.
        value: usize
    },

    /// Indicates that deduction has ruled out every value for some cell, or
    /// confined more cells to a set of values than the set can fill, that
    /// is, the puzzle is unsolvable as given.
    Contradiction {

        /// The row of the cell at which the contradiction surfaced.
        row: usize,

        /// The column of the cell at which the contradiction surfaced.
        column: usize
    }
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

impl From<BitSetError> for SudokuError {
    fn from(_: BitSetError) -> Self {
        SudokuError::OutOfBounds
    }
}

/// An enumeration of the errors that may occur when parsing a puzzle from
/// its row strings.
#[derive(Debug, Eq, PartialEq)]
pub enum PuzzleParseError {

    /// Indicates that the input does not consist of exactly 9 rows.
    WrongNumberOfRows,

    /// Indicates that some row does not consist of exactly 9 characters.
    WrongRowLength,

    /// Indicates that some character is not a digit between '0' and '9'.
    InvalidCharacter
}

/// Syntactic sugar for `Result<V, PuzzleParseError>`.
pub type PuzzleParseResult<V> = Result<V, PuzzleParseError>;
