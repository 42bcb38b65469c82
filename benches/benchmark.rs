use criterion::{criterion_group, criterion_main, Criterion};

use sudoku_deduction::SudokuGrid;
use sudoku_deduction::solver::Solution;

const EXAMPLE: [&'static str; 9] = [
    "004000918",
    "000400000",
    "100200300",
    "807620000",
    "031000650",
    "000037802",
    "003004005",
    "000002000",
    "562000100"
];

const DIABOLICAL: [&'static str; 9] = [
    "004501900",
    "020080030",
    "600000005",
    "008706300",
    "050000090",
    "003408500",
    "300000009",
    "080070060",
    "002805100"
];

fn parse(rows: &[&str]) -> SudokuGrid {
    SudokuGrid::from_rows(rows).unwrap()
}

fn solve(grid: &SudokuGrid) -> Solution {
    let mut grid = grid.clone();
    grid.solve().unwrap()
}

fn drain(grid: &SudokuGrid) -> bool {
    let mut grid = grid.clone();
    grid.propagate().unwrap()
}

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| parse(&EXAMPLE)));
}

fn benchmark_propagate(c: &mut Criterion) {
    let example = parse(&EXAMPLE);
    c.bench_function("propagate", |b| b.iter(|| drain(&example)));
}

fn benchmark_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    let example = parse(&EXAMPLE);
    let diabolical = parse(&DIABOLICAL);

    group.bench_function("example", |b| b.iter(|| solve(&example)));
    group.bench_function("diabolical", |b| b.iter(|| solve(&diabolical)));
}

criterion_group!(all, benchmark_parse, benchmark_propagate, benchmark_solve);
criterion_main!(all);
