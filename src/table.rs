//! This module contains the generic two-dimensional [Table] container that
//! the Sudoku grid is built on. Nothing in this module knows about Sudoku;
//! it only provides bounds-checked cell, row, column, and window access over
//! a flat, row-major storage vector.

use crate::error::{SudokuError, SudokuResult};

/// A rectangular container of elements of type `T`, addressed by row and
/// column. The dimensions are fixed at construction time. All accessors are
/// bounds-checked and return a [SudokuError::OutOfBounds] for coordinates
/// outside the table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table<T> {
    rows: usize,
    columns: usize,
    content: Vec<T>
}

impl<T> Table<T> {

    /// Creates a new table with the given dimensions whose elements are
    /// produced by the given function, which receives the row and column of
    /// the element it creates. Elements are created in row-major order.
    pub fn from_fn(rows: usize, columns: usize,
            mut element: impl FnMut(usize, usize) -> T) -> Table<T> {
        let mut content = Vec::with_capacity(rows * columns);

        for row in 0..rows {
            for column in 0..columns {
                content.push(element(row, column));
            }
        }

        Table {
            rows,
            columns,
            content
        }
    }

    /// Returns the number of rows of this table.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns of this table.
    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, column: usize) -> SudokuResult<usize> {
        if row < self.rows && column < self.columns {
            Ok(row * self.columns + column)
        }
        else {
            Err(SudokuError::OutOfBounds)
        }
    }

    /// Gets a reference to the element at the specified position.
    ///
    /// # Errors
    ///
    /// If `row` or `column` are outside the table. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get(&self, row: usize, column: usize) -> SudokuResult<&T> {
        let index = self.index(row, column)?;
        Ok(&self.content[index])
    }

    /// Gets a mutable reference to the element at the specified position.
    ///
    /// # Errors
    ///
    /// If `row` or `column` are outside the table. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get_mut(&mut self, row: usize, column: usize)
            -> SudokuResult<&mut T> {
        let index = self.index(row, column)?;
        Ok(&mut self.content[index])
    }

    /// Replaces the element at the specified position.
    ///
    /// # Errors
    ///
    /// If `row` or `column` are outside the table. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn set(&mut self, row: usize, column: usize, element: T)
            -> SudokuResult<()> {
        let index = self.index(row, column)?;
        self.content[index] = element;
        Ok(())
    }

    /// Gets references to all elements of the given row, ordered by column.
    ///
    /// # Errors
    ///
    /// If `row` is outside the table. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn row(&self, row: usize) -> SudokuResult<Vec<&T>> {
        if row >= self.rows {
            return Err(SudokuError::OutOfBounds);
        }

        Ok((0..self.columns)
            .map(|column| &self.content[row * self.columns + column])
            .collect())
    }

    /// Gets references to all elements of the given column, ordered by row.
    ///
    /// # Errors
    ///
    /// If `column` is outside the table. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn column(&self, column: usize) -> SudokuResult<Vec<&T>> {
        if column >= self.columns {
            return Err(SudokuError::OutOfBounds);
        }

        Ok((0..self.rows)
            .map(|row| &self.content[row * self.columns + column])
            .collect())
    }

    /// Replaces all elements of the given row. The provided vector must
    /// contain exactly one element per column.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` is outside the table.
    /// * `SudokuError::InvalidDimensions`: If the length of `elements`
    /// differs from the number of columns.
    pub fn set_row(&mut self, row: usize, elements: Vec<T>)
            -> SudokuResult<()> {
        if row >= self.rows {
            return Err(SudokuError::OutOfBounds);
        }

        if elements.len() != self.columns {
            return Err(SudokuError::InvalidDimensions);
        }

        for (column, element) in elements.into_iter().enumerate() {
            self.content[row * self.columns + column] = element;
        }

        Ok(())
    }

    /// Replaces all elements of the given column. The provided vector must
    /// contain exactly one element per row.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `column` is outside the table.
    /// * `SudokuError::InvalidDimensions`: If the length of `elements`
    /// differs from the number of rows.
    pub fn set_column(&mut self, column: usize, elements: Vec<T>)
            -> SudokuResult<()> {
        if column >= self.columns {
            return Err(SudokuError::OutOfBounds);
        }

        if elements.len() != self.rows {
            return Err(SudokuError::InvalidDimensions);
        }

        for (row, element) in elements.into_iter().enumerate() {
            self.content[row * self.columns + column] = element;
        }

        Ok(())
    }

    /// Gets references to all elements of a rectangular window of this
    /// table, in row-major order. The window starts at the position given by
    /// `row` and `column` and extends `height` rows down and `width` columns
    /// to the right.
    ///
    /// # Errors
    ///
    /// If the window extends beyond the table in either dimension. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn window(&self, row: usize, column: usize, height: usize,
            width: usize) -> SudokuResult<Vec<&T>> {
        if row + height > self.rows || column + width > self.columns {
            return Err(SudokuError::OutOfBounds);
        }

        let mut elements = Vec::with_capacity(height * width);

        for r in row..(row + height) {
            for c in column..(column + width) {
                elements.push(&self.content[r * self.columns + c]);
            }
        }

        Ok(elements)
    }

    /// Returns an iterator over references to all elements of this table in
    /// row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.content.iter()
    }
}

impl<T: Clone> Table<T> {

    /// Creates a new table with the given dimensions in which every element
    /// is a clone of the given one.
    pub fn filled(rows: usize, columns: usize, element: T) -> Table<T> {
        Table {
            rows,
            columns,
            content: vec![element; rows * columns]
        }
    }
}
