//! CSP models of grid puzzles
//!
//! Grid models add one variable per cell in row order, so the variable ID of a cell equals its
//! cell index.

pub use self::kenken::{cage_tuples, kenken_model};
pub use self::latin::{binary_ne_grid, nary_ad_grid};
pub use self::queens::queens;

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::collections::Square;
use crate::csp::{Constraint, Csp, Value, Variable, VariableId};
use crate::error::InvalidModel;
use crate::puzzle::Solution;

mod kenken;
mod latin;
mod queens;

/// How the all-different rows and columns of a grid are modelled
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridModel {
    /// A not-equal constraint for every pair of cells in a row or column
    Binary,
    /// One all-different constraint per row and column, holding every permutation of the values
    Nary,
}

impl GridModel {
    pub const ALL: [GridModel; 2] = [GridModel::Binary, GridModel::Nary];

    pub fn name(self) -> &'static str {
        match self {
            GridModel::Binary => "binary",
            GridModel::Nary => "nary",
        }
    }
}

impl Default for GridModel {
    fn default() -> Self {
        GridModel::Binary
    }
}

impl Display for GridModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown grid model \"{0}\", expected one of binary, nary")]
pub struct UnknownGridModel(String);

impl FromStr for GridModel {
    type Err = UnknownGridModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.name() == s)
            .ok_or_else(|| UnknownGridModel(s.to_owned()))
    }
}

/// The assigned values of a grid model, if every cell is assigned
pub fn grid_solution(csp: &Csp) -> Option<Solution> {
    Square::try_from(csp.solution()?).ok()
}

/// Adds a `width * width` grid of cell variables over `1..=width`, named `Cell(row,col)`
fn add_grid_variables(csp: &mut Csp, width: usize) -> Square<VariableId> {
    let mut cells = Square::with_width_and_value(width, VariableId::new(0));
    for cell in 0..width.pow(2) {
        let name = format!("Cell({},{})", cell / width + 1, cell % width + 1);
        cells[cell] = csp.add_variable(Variable::new(name, 1..=width as Value));
    }
    cells
}

/// Constrains every row and column of `cells` to hold different values
fn add_grid_constraints(
    csp: &mut Csp,
    cells: &Square<VariableId>,
    model: GridModel,
) -> Result<(), InvalidModel> {
    let lines = cells
        .rows()
        .map(<[VariableId]>::to_vec)
        .enumerate()
        .map(|(i, row)| (format!("Row{}", i + 1), row))
        .chain(
            cells
                .cols()
                .map(|col| col.copied().collect::<Vec<_>>())
                .enumerate()
                .map(|(i, col)| (format!("Col{}", i + 1), col)),
        )
        .collect::<Vec<_>>();
    for (name, line) in lines {
        match model {
            GridModel::Binary => {
                for (&a, &b) in line.iter().tuple_combinations() {
                    let constraint_name = format!(
                        "{}:{}!={}",
                        name,
                        csp.variable(a).name(),
                        csp.variable(b).name()
                    );
                    let constraint = not_equal(csp, constraint_name, a, b)?;
                    csp.add_constraint(constraint)?;
                }
            }
            GridModel::Nary => {
                let constraint = all_different(csp, format!("{}:AllDiff", name), line)?;
                csp.add_constraint(constraint)?;
            }
        }
    }
    Ok(())
}

/// `a != b` over the domains of `a` and `b`
fn not_equal(
    csp: &Csp,
    name: String,
    a: VariableId,
    b: VariableId,
) -> Result<Constraint, InvalidModel> {
    let mut constraint = Constraint::new(name, vec![a, b]);
    let tuples = csp
        .variable(a)
        .domain()
        .iter()
        .cartesian_product(csp.variable(b).domain())
        .filter(|(x, y)| x != y)
        .map(|(&x, &y)| [x, y]);
    constraint.add_satisfying_tuples(tuples)?;
    Ok(constraint)
}

/// Every way to give the variables of `scope` pairwise different values from their domains
fn all_different(
    csp: &Csp,
    name: String,
    scope: Vec<VariableId>,
) -> Result<Constraint, InvalidModel> {
    let tuples: Vec<Vec<Value>> = scope
        .iter()
        .map(|&v| csp.variable(v).domain().to_vec())
        .multi_cartesian_product()
        .filter(|values| values.iter().tuple_combinations().all(|(a, b)| a != b))
        .collect();
    let mut constraint = Constraint::new(name, scope);
    constraint.add_satisfying_tuples(tuples)?;
    Ok(constraint)
}
