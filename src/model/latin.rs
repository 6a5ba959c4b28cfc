use crate::csp::Csp;
use crate::error::InvalidModel;
use crate::model::{add_grid_constraints, add_grid_variables, GridModel};

/// An `n * n` Latin square: cells over `1..=n` with a not-equal constraint for every pair of cells
/// in a row or column
pub fn binary_ne_grid(n: usize) -> Result<Csp, InvalidModel> {
    latin_grid(format!("{}x{} binary not-equal grid", n, n), n, GridModel::Binary)
}

/// An `n * n` Latin square: cells over `1..=n` with one all-different constraint per row and
/// column. Each constraint holds `n!` tuples.
pub fn nary_ad_grid(n: usize) -> Result<Csp, InvalidModel> {
    latin_grid(format!("{}x{} all-different grid", n, n), n, GridModel::Nary)
}

fn latin_grid(name: String, n: usize, model: GridModel) -> Result<Csp, InvalidModel> {
    if n == 0 {
        return Err(InvalidModel::EmptyGrid);
    }
    let mut csp = Csp::new(name);
    let cells = add_grid_variables(&mut csp, n);
    add_grid_constraints(&mut csp, &cells, model)?;
    Ok(csp)
}

#[cfg(test)]
mod tests {
    use crate::error::InvalidModel;
    use crate::model::{binary_ne_grid, grid_solution, nary_ad_grid};
    use crate::propagate::Propagator;
    use crate::puzzle::{Puzzle, Solution};
    use crate::search::{bt_search, VariableOrder};

    fn is_latin(square: &Solution) -> bool {
        let width = square.width();
        let line_ok = |mut line: Vec<i32>| {
            line.sort_unstable();
            line == (1..=width as i32).collect::<Vec<_>>()
        };
        square.rows().all(|row| line_ok(row.to_vec()))
            && square.cols().all(|col| line_ok(col.copied().collect()))
    }

    #[test]
    fn constraint_counts() {
        let binary = binary_ne_grid(3).unwrap();
        assert_eq!(9, binary.variables().len());
        // 3 pairs in each of 3 rows and 3 columns
        assert_eq!(18, binary.constraints().len());
        assert!(binary.constraints().iter().all(|c| c.tuple_count() == 6));
        let nary = nary_ad_grid(3).unwrap();
        assert_eq!(6, nary.constraints().len());
        assert!(nary.constraints().iter().all(|c| c.tuple_count() == 6));
        assert_eq!("Cell(2,3)", nary.variable(nary.variable_ids().nth(5).unwrap()).name());
    }

    #[test]
    fn zero_width() {
        assert_eq!(Some(InvalidModel::EmptyGrid), binary_ne_grid(0).err());
        assert_eq!(Some(InvalidModel::EmptyGrid), nary_ad_grid(0).err());
    }

    #[test]
    fn three_by_three_gac_mrv() {
        let mut csp = binary_ne_grid(3).unwrap();
        assert!(bt_search(&mut csp, Propagator::gac(), VariableOrder::Mrv));
        assert!(csp.is_satisfied());
        assert!(is_latin(&grid_solution(&csp).unwrap()));
    }

    #[test]
    fn every_propagator_on_both_models() {
        for &propagator in &Propagator::ALL {
            for csp in &mut [binary_ne_grid(4).unwrap(), nary_ad_grid(4).unwrap()] {
                assert!(bt_search(csp, propagator, VariableOrder::Mrv));
                assert!(is_latin(&grid_solution(csp).unwrap()));
            }
        }
    }

    #[test]
    fn solution_is_a_valid_puzzle_grid() {
        // a 1x1 puzzle's only cell must be 1
        let mut csp = binary_ne_grid(1).unwrap();
        assert!(bt_search(&mut csp, Propagator::forward_checking(), VariableOrder::First));
        let puzzle = Puzzle::parse("1\nA\n1").unwrap();
        assert!(puzzle.verify_solution(&grid_solution(&csp).unwrap()));
    }
}
