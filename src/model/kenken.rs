use itertools::Itertools;

use crate::csp::{Constraint, Csp, Value};
use crate::error::InvalidModel;
use crate::model::{add_grid_constraints, add_grid_variables, GridModel};
use crate::puzzle::{Cage, Puzzle};

/// A CSP for a KenKen puzzle: a Latin square of cell variables plus one constraint per cage
///
/// Single-cell cages are unary constraints that only allow the target.
pub fn kenken_model(puzzle: &Puzzle, model: GridModel) -> Result<Csp, InvalidModel> {
    let width = puzzle.width();
    let mut csp = Csp::new(format!("{}x{} KenKen ({})", width, width, model));
    let cells = add_grid_variables(&mut csp, width);
    add_grid_constraints(&mut csp, &cells, model)?;
    for (i, cage) in puzzle.cages().iter().enumerate() {
        let scope: Vec<_> = cage.cell_ids().iter().map(|&cell| cells[cell]).collect();
        let name = match cage.operator().symbol() {
            Some(symbol) => format!("Cage{}:{}{}", i + 1, cage.target(), symbol),
            None => format!("Cage{}:{}", i + 1, cage.target()),
        };
        let tuples = cage_tuples(cage, width);
        trace!("{} has {} tuples", name, tuples.len());
        let mut constraint = Constraint::new(name, scope);
        constraint.add_satisfying_tuples(tuples)?;
        csp.add_constraint(constraint)?;
    }
    debug!(
        "Built {} with {} variables and {} constraints",
        csp.name(),
        csp.variables().len(),
        csp.constraints().len()
    );
    Ok(csp)
}

/// Every assignment of `1..=width` to the cells of `cage`, in cell order, that produces the cage
/// target
///
/// Values are not required to differ: cells in the same row or column are kept apart by the grid
/// constraints.
pub fn cage_tuples(cage: &Cage, width: usize) -> Vec<Vec<Value>> {
    (0..cage.cell_count())
        .map(|_| 1..=width as Value)
        .multi_cartesian_product()
        .filter(|values| cage.is_satisfied_by(values))
        .collect()
}
