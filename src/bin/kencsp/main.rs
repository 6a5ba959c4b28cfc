#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use anyhow::Result;
use itertools::Itertools;
use kencsp::csp::Csp;
use kencsp::model::{binary_ne_grid, grid_solution, kenken_model, nary_ad_grid, queens, GridModel};
use kencsp::puzzle::Puzzle;
use kencsp::search::BacktrackSearch;

use crate::options::{Generate, Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    match options.source() {
        Source::File(path) => {
            println!("Reading puzzle from \"{}\"", path.display());
            let puzzle = Puzzle::from_file(path)?;
            solve_puzzle(&options, &puzzle)?;
        }
        &Source::Generate(Generate { count, width }) => {
            for i in 1..=count {
                println!("Generating puzzle {}/{}", i, count);
                let puzzle = Puzzle::generate_untested(width)?;
                solve_puzzle(&options, &puzzle)?;
            }
        }
        &Source::Queens(n) => {
            let mut csp = queens(n)?;
            if solve(&options, &mut csp) {
                print_queens(&csp);
            }
        }
        &Source::Grid(n) => {
            let mut csp = match options.model() {
                GridModel::Binary => binary_ne_grid(n)?,
                GridModel::Nary => nary_ad_grid(n)?,
            };
            if solve(&options, &mut csp) {
                if let Some(solution) = grid_solution(&csp) {
                    print!("{}", solution);
                }
            }
        }
    }
    Ok(())
}

fn solve_puzzle(options: &Options, puzzle: &Puzzle) -> Result<()> {
    print_puzzle(puzzle);
    let mut csp = kenken_model(puzzle, options.model())?;
    if solve(options, &mut csp) {
        if let Some(solution) = grid_solution(&csp) {
            debug_assert!(puzzle.verify_solution(&solution));
            print!("{}", solution);
        }
    }
    Ok(())
}

/// Searches for a solution and prints the outcome with search statistics
fn solve(options: &Options, csp: &mut Csp) -> bool {
    let mut search = BacktrackSearch::new(csp, options.propagator());
    search
        .variable_order(options.variable_order())
        .value_order(options.value_order());
    let result = search.solve();
    let msg = if result.is_solved() {
        "Solved"
    } else {
        "No solution"
    };
    println!("{} ({})", msg, search.stats());
    result.is_solved()
}

fn print_puzzle(puzzle: &Puzzle) {
    let cages = puzzle
        .cages()
        .iter()
        .enumerate()
        .map(|(i, cage)| {
            format!(
                " {:>2}: {}{}",
                i,
                cage.operator().symbol().unwrap_or(' '),
                cage.target()
            )
        })
        .join("\n");
    println!("{}{}", puzzle.cell_cage_indices(), cages);
}

fn print_queens(csp: &Csp) {
    let columns = match csp.solution() {
        Some(columns) => columns,
        None => return,
    };
    for &column in &columns {
        let row: String = (1..=columns.len() as i32)
            .map(|c| if c == column { 'Q' } else { '.' })
            .collect();
        println!("{}", row);
    }
}
