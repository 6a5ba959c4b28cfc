//! Random KenKen puzzle generation
//!
//! A random Latin square is cut into cages by removing random inner borders between cells, and
//! each cage gets a random operator that works for its values.

use std::collections::VecDeque;
use std::mem;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::collections::Square;
use crate::csp::Value;
use crate::error::InvalidPuzzle;
use crate::puzzle::{Cage, CageId, CellId, Operator, Puzzle, Solution};

const MAX_CAGE_SIZE: usize = 4;
const MAX_AVG_CAGE_SIZE: f32 = 2.2;
const CAGE_SIZE_DISTRIBUTION: f32 = 0.5;

type BorderId = usize;

pub fn generate_untested_puzzle(width: usize) -> Result<Puzzle, InvalidPuzzle> {
    let (puzzle, _solution) = generate_untested_puzzle_with_solution(width, &mut thread_rng())?;
    Ok(puzzle)
}

/// The solution is one of possibly many solutions of the puzzle
pub(crate) fn generate_untested_puzzle_with_solution(
    width: usize,
    rng: &mut impl Rng,
) -> Result<(Puzzle, Solution), InvalidPuzzle> {
    if width == 0 {
        return Err(InvalidPuzzle::new("puzzle width must be at least 1".into()));
    }
    let solution = random_latin_square(width, rng);
    debug!("Solution:\n{}", &solution);
    let cages = generate_cage_cells(width, rng)
        .into_iter()
        .map(|cells| {
            let values = cells.iter().map(|&i| solution[i]).collect::<Vec<_>>();
            let operator = random_operator(&values, rng);
            let target = find_cage_target(operator, &values);
            Cage::new(cells, operator, target)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let puzzle = Puzzle::new(width, cages)?;
    Ok((puzzle, solution))
}

fn random_latin_square(width: usize, rng: &mut impl Rng) -> Square<Value> {
    let mut generate_seed = || {
        let mut seed = (0..width as Value).collect::<Vec<_>>();
        seed.shuffle(rng);
        seed
    };
    let seeds = [generate_seed(), generate_seed()];
    let mut square: Square<Value> = Square::with_width(width);
    for (i, row) in square.rows_mut().enumerate() {
        for (j, element) in row.iter_mut().enumerate() {
            *element = (seeds[0][i] + seeds[1][j]) % width as Value + 1;
        }
    }
    square
}

fn shuffled_inner_borders(square_width: usize, rng: &mut impl Rng) -> Vec<BorderId> {
    let num_borders = square_width * (square_width - 1) * 2;
    let mut borders = (0..num_borders).collect::<Vec<_>>();
    borders.shuffle(rng);
    borders
}

/// Even borders are between a cell and the cell below it, odd borders between a cell and the
/// cell to its right
fn cells_touching_border(width: usize, border_id: BorderId) -> (CellId, CellId) {
    let a = border_id / 2;
    if border_id % 2 == 0 {
        (a, a + width)
    } else {
        let b = width - 1;
        let c = a / b * width + a % b;
        (c, c + 1)
    }
}

fn generate_cage_cells(width: usize, rng: &mut impl Rng) -> Vec<Vec<CellId>> {
    let num_cells = width.pow(2);
    let mut cage_map: Vec<CageId> = (0..num_cells).collect();
    let mut cages: Vec<Vec<CellId>> = (0..num_cells).map(|i| vec![i]).collect();
    let min_cage_count = (num_cells as f32 / MAX_AVG_CAGE_SIZE) as usize;
    let mut borders = VecDeque::from(shuffled_inner_borders(width, rng));
    'target_cage_sizes: for target_cage_size in 2..=MAX_CAGE_SIZE {
        let border_count = (borders.len() as f32 * CAGE_SIZE_DISTRIBUTION) as usize;
        for _ in 0..border_count {
            let border_id = match borders.pop_front() {
                Some(border_id) => border_id,
                None => break 'target_cage_sizes,
            };
            let (cell1, cell2) = cells_touching_border(width, border_id);
            let (mut cage_a, mut cage_b) = (cage_map[cell1], cage_map[cell2]);
            if cage_a > cage_b {
                mem::swap(&mut cage_a, &mut cage_b)
            }
            let cage_size = cages[cage_a].len() + cages[cage_b].len();
            if cage_size != target_cage_size {
                if cage_size > target_cage_size {
                    borders.push_back(border_id);
                }
                continue;
            }
            // merge b into a, then move the last cage into b's slot to keep IDs dense
            let last = match cages.pop() {
                Some(last) => last,
                None => break 'target_cage_sizes,
            };
            if cage_b == cages.len() {
                for &i in &last {
                    cage_map[i] = cage_a
                }
                cages[cage_a].extend(last);
            } else {
                for &i in &last {
                    cage_map[i] = cage_b
                }
                let b = mem::replace(&mut cages[cage_b], last);
                for &i in &b {
                    cage_map[i] = cage_a
                }
                cages[cage_a].extend(b);
            }
            if cages.len() == min_cage_count {
                break 'target_cage_sizes;
            }
        }
    }
    cages
}

fn random_operator(values: &[Value], rng: &mut impl Rng) -> Operator {
    if values.len() == 1 {
        return Operator::Nop;
    }
    let operators = possible_operators(values);
    operators.choose(rng).copied().unwrap_or(Operator::Add)
}

fn possible_operators(values: &[Value]) -> Vec<Operator> {
    debug_assert!(values.len() > 1);
    let mut operators = vec![Operator::Add, Operator::Multiply];
    if values.len() == 2 {
        operators.push(Operator::Subtract);
        let (min, max) = min_max(values);
        if max % min == 0 {
            operators.push(Operator::Divide);
        }
    }
    operators
}

fn find_cage_target(operator: Operator, values: &[Value]) -> Value {
    match operator {
        Operator::Add => values.iter().sum(),
        Operator::Subtract => {
            let (min, max) = min_max(values);
            max - min
        }
        Operator::Multiply => values.iter().product(),
        Operator::Divide => {
            let (min, max) = min_max(values);
            max / min
        }
        Operator::Nop => values[0],
    }
}

fn min_max(values: &[Value]) -> (Value, Value) {
    let min = values.iter().copied().min().unwrap_or_default();
    let max = values.iter().copied().max().unwrap_or_default();
    (min, max)
}
