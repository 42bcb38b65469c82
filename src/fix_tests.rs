use crate::{GroupId, SudokuGrid};
use crate::error::SudokuError;
use crate::event::{EventKind, SolvePhase};
use crate::solver::{
    CompositeStrategy,
    ExclusionStrategy,
    MatchedPairsStrategy,
    Solution,
    Strategy
};

fn example_puzzle() -> [&'static str; 9] {
    [
        "004000918",
        "000400000",
        "100200300",
        "807620000",
        "031000650",
        "000037802",
        "003004005",
        "000002000",
        "562000100"
    ]
}

fn example_solution() -> [&'static str; 9] {
    [
        "624753918",
        "379481526",
        "185296374",
        "897625431",
        "231849657",
        "456137892",
        "713964285",
        "948512763",
        "562378149"
    ]
}

// Three clues in every row, column and block.
fn sparse_puzzle() -> [&'static str; 9] {
    [
        "600700900",
        "300400500",
        "100200300",
        "090020030",
        "030040050",
        "050030090",
        "003004005",
        "008002003",
        "002008009"
    ]
}

// "Diabolical 231", a published board rated well beyond singles and pairs.
fn diabolical_puzzle() -> [&'static str; 9] {
    [
        "004501900",
        "020080030",
        "600000005",
        "008706300",
        "050000090",
        "003408500",
        "300000009",
        "080070060",
        "002805100"
    ]
}

fn clues_of(rows: &[&str]) -> Vec<(usize, usize, usize)> {
    let mut clues = Vec::new();

    for (row, row_str) in rows.iter().enumerate() {
        for (column, digit) in row_str.chars().enumerate() {
            let value = digit.to_digit(10).unwrap() as usize;

            if value > 0 {
                clues.push((row, column, value));
            }
        }
    }

    clues
}

#[test]
fn deduction_solves_example_puzzle() {
    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();

    assert_eq!(Solution::Complete, grid.solve().unwrap());
    assert_eq!(example_solution().to_vec(), grid.to_rows(),
        "Deduction gave wrong grid.");
}

#[test]
fn solved_grid_is_complete_and_valid() {
    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();
    grid.solve().unwrap();

    assert!(grid.is_complete());
    assert_eq!(81, grid.count_known());
    assert_eq!(Ok(()), grid.check_validity());
    assert_eq!(Ok(()), grid.check_validity());
}

#[test]
fn solving_a_solved_grid_changes_nothing() {
    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();

    assert_eq!(Solution::Complete, grid.solve().unwrap());

    let rows = grid.to_rows();
    let events = grid.events().len();

    assert_eq!(Solution::Complete, grid.solve().unwrap());
    assert_eq!(rows, grid.to_rows());
    assert_eq!(events, grid.events().len());
}

#[test]
fn event_log_covers_every_cell_exactly_once() {
    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();
    grid.solve().unwrap();

    let events = grid.events();
    assert_eq!(81, events.len());

    let mut seen = [[false; 9]; 9];

    for event in events {
        assert!(!seen[event.row()][event.column()]);
        seen[event.row()][event.column()] = true;
        assert_eq!(Some(event.value()),
            grid.get(event.row(), event.column()).unwrap().value());
    }
}

#[test]
fn event_log_starts_with_clues_in_parse_order() {
    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();
    grid.solve().unwrap();

    let events = grid.events();
    let clues = clues_of(&example_puzzle());

    for (event, &(row, column, value)) in events.iter().zip(clues.iter()) {
        assert_eq!(EventKind::Assigned, event.kind());
        assert_eq!(SolvePhase::Init, event.phase());
        assert_eq!(row, event.row());
        assert_eq!(column, event.column());
        assert_eq!(value, event.value());
    }

    for event in &events[clues.len()..] {
        assert_ne!(SolvePhase::Init, event.phase());
    }

    // The first propagation pass alone collapses at least one cell.
    assert!(events.iter().any(|event|
        event.kind() == EventKind::Solved &&
            event.phase() == SolvePhase::Assert));
}

#[test]
fn clue_order_is_irrelevant() {
    let mut forward = SudokuGrid::from_rows(&example_puzzle()).unwrap();
    let mut reversed = SudokuGrid::new();

    for &(row, column, value) in clues_of(&example_puzzle()).iter().rev() {
        reversed.assign(row, column, value).unwrap();
    }

    assert_eq!(Solution::Complete, forward.solve().unwrap());
    assert_eq!(Solution::Complete, reversed.solve().unwrap());
    assert_eq!(forward.to_rows(), reversed.to_rows());
}

fn assert_solve_keeps_invariants(rows: &[&str]) {
    let mut grid = SudokuGrid::from_rows(rows).unwrap();
    let solution = grid.solve().unwrap();

    assert_eq!(Ok(()), grid.check_validity());

    // Clues are never overwritten.
    for (row, column, value) in clues_of(rows) {
        assert_eq!(Some(value), grid.get(row, column).unwrap().value());
    }

    match solution {
        Solution::Complete => assert_eq!(81, grid.count_known()),
        Solution::Partial => {
            for row in 0..9 {
                for column in 0..9 {
                    let cell = grid.get(row, column).unwrap();

                    if !cell.is_known() {
                        assert!(cell.candidates().len() >= 2);
                    }
                }
            }
        }
    }
}

#[test]
fn sparse_puzzle_keeps_invariants() {
    assert_solve_keeps_invariants(&sparse_puzzle());
}

#[test]
fn diabolical_puzzle_keeps_invariants() {
    assert_solve_keeps_invariants(&diabolical_puzzle());
}

#[test]
fn conflicting_clues_parse_but_fail_to_solve() {
    let mut rows = example_puzzle();
    rows[0] = "044000918";

    let mut grid = SudokuGrid::from_rows(&rows).unwrap();
    assert_eq!(29, grid.count_known());

    assert_eq!(Err(SudokuError::DuplicateValue {
        group: GroupId::Row(0),
        value: 4
    }), grid.solve());

    // The duplicate was rejected before any propagation happened.
    assert_eq!(rows.to_vec(), grid.to_rows());
}

#[test]
fn clues_conflicting_across_a_column_fail_to_solve() {
    // Every row is clean on its own; the 1 repeats within column 5.
    let rows = [
        "600700900",
        "009001006",
        "080090070",
        "800600400",
        "001004007",
        "050030090",
        "700900200",
        "008001003",
        "060070040"
    ];

    let mut grid = SudokuGrid::from_rows(&rows).unwrap();

    assert_eq!(Err(SudokuError::DuplicateValue {
        group: GroupId::Column(5),
        value: 1
    }), grid.solve());
    assert_eq!(rows.to_vec(), grid.to_rows());
}

#[test]
fn candidate_sets_only_shrink() {
    fn possibilities(grid: &SudokuGrid) -> Vec<Vec<bool>> {
        let mut result = Vec::new();

        for row in 0..9 {
            for column in 0..9 {
                let cell = grid.get(row, column).unwrap();
                result.push((1..=9)
                    .map(|value| cell.is_possible(value))
                    .collect());
            }
        }

        result
    }

    fn assert_shrunk(before: &[Vec<bool>], after: &[Vec<bool>]) {
        for (cell_before, cell_after) in before.iter().zip(after.iter()) {
            for (&was, &is) in cell_before.iter().zip(cell_after.iter()) {
                if is {
                    assert!(was);
                }
            }
        }
    }

    let mut grid = SudokuGrid::from_rows(&example_puzzle()).unwrap();
    let strategy =
        CompositeStrategy::new(MatchedPairsStrategy, ExclusionStrategy);
    let mut before = possibilities(&grid);

    loop {
        let mut progress = grid.propagate().unwrap();
        let after_propagation = possibilities(&grid);
        assert_shrunk(&before, &after_propagation);

        progress |= strategy.apply(&mut grid).unwrap();
        let after_strategy = possibilities(&grid);
        assert_shrunk(&after_propagation, &after_strategy);

        before = after_strategy;

        if !progress {
            break;
        }
    }

    assert!(grid.is_complete());
}
