pub use self::operator::Operator;

use crate::csp::Value;
use crate::error::InvalidPuzzle;
use crate::puzzle::CellId;

mod operator;

/// A cage in a KenKen puzzle
///
/// Every cell in a KenKen puzzle belongs to a cage.
/// Every cage has an operator and a target number.
#[derive(Debug, PartialEq)]
pub struct Cage {
    /// The cells in this cage, sorted
    cell_ids: Box<[CellId]>,

    /// The math operator that must be used with the numbers in the cage
    /// to produce the target number
    operator: Operator,

    /// The target number that must be produced using the numbers in this cage
    target: Value,
}

impl Cage {
    pub fn new(
        cell_ids: impl Into<Box<[CellId]>>,
        operator: Operator,
        target: Value,
    ) -> Result<Self, InvalidPuzzle> {
        fn inner(
            mut cell_ids: Box<[CellId]>,
            operator: Operator,
            target: Value,
        ) -> Result<Cage, InvalidPuzzle> {
            cell_ids.sort_unstable();
            let cage = Cage {
                cell_ids,
                operator,
                target,
            };
            validate(&cage)?;
            Ok(cage)
        }
        inner(cell_ids.into(), operator, target)
    }

    /// The number on the cage
    pub fn target(&self) -> Value {
        self.target
    }

    /// The math operator on the cage
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The IDs of the cells in the cage
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cell_ids
    }

    pub fn cell_count(&self) -> usize {
        self.cell_ids.len()
    }

    /// Returns true if `values`, one per cell in cell order, satisfy the cage
    pub fn is_satisfied_by(&self, values: &[Value]) -> bool {
        values.len() == self.cell_ids.len() && self.operator.produces(values, self.target)
    }
}

fn validate(cage: &Cage) -> Result<(), InvalidPuzzle> {
    if cage.cell_ids.windows(2).any(|w| w[0] == w[1]) {
        return Err(InvalidPuzzle::new("cage cells must be unique".into()));
    }
    match cage.cell_ids().len() {
        0 => return Err(InvalidPuzzle::new("cage cell_ids must not be empty".into())),
        1 => match cage.operator {
            Operator::Nop => (),
            operator => {
                return Err(InvalidPuzzle::new(format!(
                    "cage operator ({:?}) must have more than one cell",
                    operator
                )))
            }
        },
        _ => {
            if cage.operator == Operator::Nop {
                return Err(InvalidPuzzle::new(
                    "cage with multiple cells must have an operator".into(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::puzzle::{Cage, Operator};

    #[test]
    fn sorts_cells() {
        let cage = Cage::new(vec![4, 0, 1], Operator::Add, 7).unwrap();
        assert_eq!(&[0, 1, 4], cage.cell_ids());
        assert!(cage.is_satisfied_by(&[1, 2, 4]));
        assert!(!cage.is_satisfied_by(&[1, 2]));
    }

    #[test]
    fn invalid() {
        assert!(Cage::new(Vec::<usize>::new(), Operator::Add, 1).is_err());
        assert!(Cage::new(vec![0], Operator::Add, 1).is_err());
        assert!(Cage::new(vec![0, 1], Operator::Nop, 1).is_err());
        assert!(Cage::new(vec![1, 1], Operator::Add, 2).is_err());
        assert!(Cage::new(vec![3], Operator::Nop, 1).is_ok());
    }
}
