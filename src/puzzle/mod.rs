//! KenKen puzzles

pub use self::cage::{Cage, Operator};

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::collections::Square;
use crate::csp::Value;
use crate::error::{InvalidPuzzle, ParsePuzzleError, PuzzleFromFileError};
use crate::generate::generate_untested_puzzle;
use crate::parse::{cage_letter, parse_puzzle};

mod cage;

pub type CageId = usize;
pub type CellId = usize;
pub type Solution = Square<Value>;

/// The largest puzzle width that can be parsed or generated
pub const MAX_PUZZLE_WIDTH: usize = 9;

/// An unsolved KenKen puzzle
#[derive(Debug, PartialEq)]
pub struct Puzzle {
    /// the width and height of the puzzle
    width: usize,
    /// contains all cages in the puzzle
    cages: Vec<Cage>,
    /// the cage of each cell
    cage_map: Square<CageId>,
}

impl Puzzle {
    /// Creates a puzzle with a specified width and set of cages. Every cell must be in exactly one
    /// cage.
    pub fn new(width: usize, cages: Vec<Cage>) -> Result<Self, InvalidPuzzle> {
        if width == 0 || width > MAX_PUZZLE_WIDTH {
            return Err(InvalidPuzzle::new(format!(
                "puzzle width must be between 1 and {}",
                MAX_PUZZLE_WIDTH
            )));
        }
        let cage_map = cage_map(width, &cages)?;
        Ok(Self {
            width,
            cages,
            cage_map,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleFromFileError> {
        let s = fs::read_to_string(path)?;
        let puzzle = Self::parse(&s)?;
        Ok(puzzle)
    }

    /// Generates a random puzzle. The puzzle may have more than one solution.
    pub fn generate_untested(width: usize) -> Result<Self, InvalidPuzzle> {
        generate_untested_puzzle(width)
    }

    pub fn parse(s: &str) -> Result<Self, ParsePuzzleError> {
        parse_puzzle(s)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.width.pow(2)
    }

    pub fn cage(&self, id: CageId) -> &Cage {
        &self.cages[id]
    }

    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// The cage containing `cell`
    pub fn cell_cage(&self, cell: CellId) -> &Cage {
        &self.cages[self.cage_map[cell]]
    }

    /// The cage ID of every cell
    pub fn cell_cage_indices(&self) -> &Square<CageId> {
        &self.cage_map
    }

    /// Returns true if every row and column holds `1..=width` once and every cage is satisfied
    pub fn verify_solution(&self, solution: &Solution) -> bool {
        if solution.width() != self.width {
            return false;
        }
        let values_ok = |line: Vec<Value>| {
            let mut seen = vec![false; self.width];
            line.into_iter().all(|v| {
                v >= 1 && v as usize <= self.width && !std::mem::replace(&mut seen[v as usize - 1], true)
            })
        };
        solution.rows().all(|row| values_ok(row.to_vec()))
            && solution.cols().all(|col| values_ok(col.copied().collect()))
            && self.cages.iter().all(|cage| {
                let values: Vec<Value> = cage.cell_ids().iter().map(|&i| solution[i]).collect();
                cage.is_satisfied_by(&values)
            })
    }
}

/// Creates a square of values where each value is the index of the cage containing that cell
fn cage_map(width: usize, cages: &[Cage]) -> Result<Square<CageId>, InvalidPuzzle> {
    let mut cage_map: Square<Option<CageId>> = Square::with_width(width);
    for (i, cage) in cages.iter().enumerate() {
        for &cell in cage.cell_ids() {
            let slot = cage_map
                .get(cell)
                .ok_or_else(|| InvalidPuzzle::new(format!("cell {} is outside the puzzle", cell)))?;
            if slot.is_some() {
                return Err(InvalidPuzzle::new(format!("cell {} is in more than one cage", cell)));
            }
            cage_map[cell] = Some(i);
        }
    }
    let mut ids = Square::with_width(width);
    for (cell, cage) in cage_map.iter().enumerate() {
        ids[cell] = cage.ok_or_else(|| InvalidPuzzle::new(format!("cell {} is not in a cage", cell)))?;
    }
    Ok(ids)
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.width)?;
        for row in self.cage_map.rows() {
            for &cage in row {
                write!(f, "{}", cage_letter(cage).unwrap_or('?'))?;
            }
            writeln!(f)?;
        }
        for cage in &self.cages {
            write!(f, "{}", cage.target())?;
            if let Some(s) = cage.operator().symbol() {
                write!(f, "{}", s)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use crate::collections::Square;
    use crate::puzzle::{Cage, Operator, Puzzle};

    /// 2x2: A = {0, 1} 3+, B = {2} 2, C = {3} 1
    fn small() -> Puzzle {
        Puzzle::new(
            2,
            vec![
                Cage::new(vec![0, 1], Operator::Add, 3).unwrap(),
                Cage::new(vec![2], Operator::Nop, 2).unwrap(),
                Cage::new(vec![3], Operator::Nop, 1).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn cells_must_be_covered_once() {
        let overlap = vec![
            Cage::new(vec![0, 1], Operator::Add, 3).unwrap(),
            Cage::new(vec![1, 2, 3], Operator::Add, 4).unwrap(),
        ];
        assert!(Puzzle::new(2, overlap).is_err());
        let missing = vec![Cage::new(vec![0, 1, 2], Operator::Add, 4).unwrap()];
        assert!(Puzzle::new(2, missing).is_err());
        let outside = vec![Cage::new(vec![0, 1, 2, 3, 4], Operator::Add, 4).unwrap()];
        assert!(Puzzle::new(2, outside).is_err());
    }

    #[test]
    fn display_parses_back() {
        let puzzle = small();
        let s = puzzle.to_string();
        assert_eq!("2\nAA\nBC\n3+\n2\n1\n", s);
        assert_eq!(puzzle, Puzzle::parse(&s).unwrap());
    }

    #[test]
    fn verify_solution() {
        let puzzle = small();
        assert_eq!(&puzzle.cages()[0], puzzle.cell_cage(1));
        assert!(puzzle.verify_solution(&Square::try_from(vec![1, 2, 2, 1]).unwrap()));
        assert!(!puzzle.verify_solution(&Square::try_from(vec![2, 1, 1, 2]).unwrap()));
        assert!(!puzzle.verify_solution(&Square::try_from(vec![1, 2, 1, 2]).unwrap()));
    }
}
