//! This module is about the strategic part of solving: the elimination
//! strategies that fire when plain propagation runs dry, and the solver
//! loop that alternates between the two until neither makes progress.
//!
//! All strategies implement the [Strategy] trait. They never guess; every
//! move a strategy makes is a logical consequence of the current candidate
//! state, so a completed grid is always *the* solution. Two strategies are
//! provided: [ExclusionStrategy] finds hidden singles and
//! [MatchedPairsStrategy] finds naked pairs. [CompositeStrategy] chains two
//! strategies into one, which is how the standard schedule is built.
//!
//! The [DeductiveSolver] drives a [SudokuGrid](crate::SudokuGrid) to the
//! fixpoint of propagation and its strategy. It never backtracks; if the
//! fixpoint is reached before the grid is complete, the partial state is
//! reported as-is.
//!
//! ```
//! use sudoku_deduction::SudokuGrid;
//! use sudoku_deduction::solver::{DeductiveSolver, Solution};
//!
//! let mut grid = SudokuGrid::new();
//!
//! for column in 0..8 {
//!     grid.assign(0, column, column + 1).unwrap();
//! }
//!
//! let solver = DeductiveSolver::standard();
//!
//! // Propagation completes the first row, but nothing else can be
//! // deduced from a single row.
//! assert_eq!(Solution::Partial, solver.solve(&mut grid).unwrap());
//! assert_eq!(Some(9), grid.get(0, 8).unwrap().value());
//! assert_eq!(9, grid.count_known());
//! ```

use crate::SudokuGrid;
use crate::error::{SudokuError, SudokuResult};
use crate::event::SolvePhase;
use crate::util::BitSet;

/// The outcome of a solver run that did not fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Every cell of the grid is known and the final validity check
    /// passed. Since no strategy ever guesses, this is the unique solution
    /// of the puzzle.
    Complete,

    /// Deduction stalled before the grid was complete. The grid holds all
    /// values and candidate eliminations that could be derived; every
    /// unknown cell still has at least two candidates.
    Partial
}

/// A trait for strategies which make deductions on a
/// [SudokuGrid](crate::SudokuGrid) beyond plain propagation of known
/// values. Strategies work on the candidate state the grid has *right
/// now*; they are called with a drained event queue, but must remain sound
/// if applied at any other time. Since candidates only ever shrink, a
/// candidate that is absent is reliable information, while a present one
/// may still turn out to be impossible.
pub trait Strategy {

    /// Applies this strategy to the given grid. Returns `true` if anything
    /// changed, that is, a value was assigned or a candidate was removed,
    /// and `false` otherwise. A `false` return tells the solver that
    /// applying this strategy again would not help.
    ///
    /// # Errors
    ///
    /// `SudokuError::Contradiction`, if the strategy proves the puzzle
    /// unsolvable.
    fn apply(&self, grid: &mut SudokuGrid) -> SudokuResult<bool>;
}

/// A [Strategy] which detects hidden singles: if a candidate value is
/// impossible for every other cell of some group, the one remaining cell
/// must hold that value, even if the cell itself still has several
/// candidates.
///
/// As a small example, consider the top-left block of the following grid:
///
/// ```text
/// ╔═══╤═══╤═══╦═══
/// ║   │   │   ║ 3
/// ╟───┼───┼───╫───
/// ║   │   │   ║
/// ╟───┼───┼───╫───
/// ║ X │   │   ║
/// ╠═══╪═══╪═══╬═══
/// ║   │ 3 │   ║
/// ```
///
/// The 3 in the first row rules out a 3 for the first row of the block,
/// and the 3 below the block does the same for its second column. If the
/// remaining cells of the block cannot hold a 3 either, the cell marked X
/// is the only cell of the block left for the 3, so it is assigned.
///
/// This strategy makes at most one assignment per application and returns
/// immediately once it has moved, so that the resulting propagation runs
/// before any further conclusion is drawn.
#[derive(Clone)]
pub struct ExclusionStrategy;

impl Strategy for ExclusionStrategy {

    fn apply(&self, grid: &mut SudokuGrid) -> SudokuResult<bool> {
        grid.set_phase(SolvePhase::Exclusive);
        let groups = grid.groups().to_vec();

        for group in groups {
            for (row, column) in group.iter() {
                if grid.get(row, column)?.is_known() {
                    continue;
                }

                let candidates = grid.get(row, column)?.candidates();

                for candidate in candidates {
                    let exclusive = group.iter()
                        .filter(|&position| position != (row, column))
                        .all(|(peer_row, peer_column)|
                            !grid.get(peer_row, peer_column).unwrap()
                                .is_possible(candidate));

                    if exclusive {
                        grid.assign(row, column, candidate)?;
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }
}

/// A [Strategy] which detects naked pairs: two cells of one group that
/// share the exact same two candidates. Those two values are locked into
/// those two cells in some order, so they can be removed from the
/// candidates of every other cell of the group.
///
/// If *three* or more cells of one group share the same two candidates,
/// the group cannot be filled at all, which proves the puzzle unsolvable.
///
/// Unlike [ExclusionStrategy], this strategy processes all groups in one
/// application, since removing candidates does not enqueue propagation
/// work by itself.
#[derive(Clone)]
pub struct MatchedPairsStrategy;

impl Strategy for MatchedPairsStrategy {

    fn apply(&self, grid: &mut SudokuGrid) -> SudokuResult<bool> {
        grid.set_phase(SolvePhase::Pairs);
        let groups = grid.groups().to_vec();
        let mut changed = false;

        for group in groups {
            let mut buckets: Vec<(BitSet, Vec<(usize, usize)>)> = Vec::new();

            for (row, column) in group.iter() {
                let cell = grid.get(row, column)?;

                if cell.is_known() || cell.candidate_set().len() != 2 {
                    continue;
                }

                let candidate_set = cell.candidate_set().clone();
                let bucket = buckets.iter()
                    .position(|(set, _)| *set == candidate_set);

                match bucket {
                    Some(index) => buckets[index].1.push((row, column)),
                    None => buckets.push((candidate_set, vec![(row, column)]))
                }
            }

            for (set, positions) in buckets {
                if positions.len() > 2 {
                    let (row, column) = positions[0];
                    return Err(SudokuError::Contradiction { row, column });
                }

                if positions.len() < 2 {
                    continue;
                }

                let values: Vec<usize> =
                    set.iter().map(|index| index + 1).collect();

                for (row, column) in group.iter() {
                    if positions.contains(&(row, column)) ||
                            grid.get(row, column)?.is_known() {
                        continue;
                    }

                    for &value in &values {
                        if grid.get(row, column)?.is_possible(value) {
                            grid.clear_candidate(row, column, value)?;
                            changed = true;
                        }
                    }
                }
            }
        }

        Ok(changed)
    }
}

/// A [Strategy] which uses two strategies by first applying one and then
/// the other on the output of the first one. Both children are always
/// applied; if either changed the state, this strategy is defined to have
/// changed the state as well.
pub struct CompositeStrategy<S1: Strategy, S2: Strategy> {
    s1: S1,
    s2: S2
}

impl<S1: Strategy, S2: Strategy> CompositeStrategy<S1, S2> {

    /// Creates a new composite strategy from the two children strategies.
    ///
    /// # Arguments
    ///
    /// * `s1`: The strategy which is applied first.
    /// * `s2`: The strategy which is applied second.
    pub fn new(s1: S1, s2: S2) -> CompositeStrategy<S1, S2> {
        CompositeStrategy {
            s1,
            s2
        }
    }
}

impl<S1: Strategy, S2: Strategy> Strategy for CompositeStrategy<S1, S2> {

    fn apply(&self, grid: &mut SudokuGrid) -> SudokuResult<bool> {
        let first = self.s1.apply(grid)?;
        let second = self.s2.apply(grid)?;
        Ok(first || second)
    }
}

impl<S1: Strategy + Clone, S2: Strategy + Clone> Clone
        for CompositeStrategy<S1, S2> {

    fn clone(&self) -> Self {
        CompositeStrategy::new(self.s1.clone(), self.s2.clone())
    }
}

/// A solver which drives a [SudokuGrid](crate::SudokuGrid) to the fixpoint
/// of propagation and a [Strategy], without ever guessing. One loop
/// iteration first drains the propagation queue and then applies the
/// strategy; the loop ends once an iteration makes no progress at all.
/// Validity is checked before the loop, so conflicting clues are rejected
/// up front, and after it, so no wrong deduction can go unnoticed.
pub struct DeductiveSolver<S: Strategy> {
    strategy: S
}

impl<S: Strategy> DeductiveSolver<S> {

    /// Creates a new deductive solver that runs the given `strategy` in
    /// every loop iteration.
    pub fn new(strategy: S) -> DeductiveSolver<S> {
        DeductiveSolver { strategy }
    }

    /// Solves the given grid as far as pure deduction allows. The grid is
    /// modified in place and holds all progress afterwards, also in the
    /// [Solution::Partial] case.
    ///
    /// # Errors
    ///
    /// * `SudokuError::DuplicateValue`: If some value appears twice within
    /// one group, either among the clues or after deduction has finished.
    /// * `SudokuError::Contradiction`: If propagation or the strategy
    /// proves the puzzle unsolvable.
    pub fn solve(&self, grid: &mut SudokuGrid) -> SudokuResult<Solution> {
        grid.check_validity()?;

        loop {
            let mut progress = grid.propagate()?;
            progress |= self.strategy.apply(grid)?;

            if !progress {
                break;
            }
        }

        grid.check_validity()?;

        if grid.is_complete() {
            Ok(Solution::Complete)
        }
        else {
            Ok(Solution::Partial)
        }
    }
}

impl DeductiveSolver<CompositeStrategy<MatchedPairsStrategy,
        ExclusionStrategy>> {

    /// Creates the solver with the standard strategy schedule used by
    /// [SudokuGrid::solve](crate::SudokuGrid::solve): naked pairs first,
    /// then hidden singles.
    pub fn standard() -> DeductiveSolver<CompositeStrategy<
            MatchedPairsStrategy, ExclusionStrategy>> {
        DeductiveSolver::new(
            CompositeStrategy::new(MatchedPairsStrategy, ExclusionStrategy))
    }
}

impl<S: Strategy + Clone> Clone for DeductiveSolver<S> {

    fn clone(&self) -> Self {
        DeductiveSolver::new(self.strategy.clone())
    }
}
