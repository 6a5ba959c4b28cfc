use itertools::Itertools;

use crate::csp::{Constraint, Csp, Value, Variable};
use crate::error::InvalidModel;

/// Places `n` queens on an `n * n` board, one per row. Variable `Q{i}` holds the column of the
/// queen in row `i`, and every pair of rows gets a constraint forbidding a shared column or
/// diagonal.
pub fn queens(n: usize) -> Result<Csp, InvalidModel> {
    let mut csp = Csp::new(format!("{}-Queens", n));
    let rows: Vec<_> = (1..=n)
        .map(|i| csp.add_variable(Variable::new(format!("Q{}", i), 1..=n as Value)))
        .collect();
    for ((i, &qi), (j, &qj)) in rows.iter().enumerate().tuple_combinations() {
        let distance = (j - i) as Value;
        let tuples = (1..=n as Value)
            .cartesian_product(1..=n as Value)
            .filter(|&(a, b)| a != b && (a - b).abs() != distance)
            .map(|(a, b)| [a, b]);
        let mut constraint = Constraint::new(format!("Q{},Q{}", i + 1, j + 1), vec![qi, qj]);
        constraint.add_satisfying_tuples(tuples)?;
        csp.add_constraint(constraint)?;
    }
    Ok(csp)
}

#[cfg(test)]
mod tests {
    use crate::model::queens;
    use crate::propagate::Propagator;
    use crate::search::{bt_search, VariableOrder};

    fn attacks(columns: &[i32]) -> bool {
        (0..columns.len()).any(|i| {
            (i + 1..columns.len()).any(|j| {
                columns[i] == columns[j] || (columns[i] - columns[j]).abs() == (j - i) as i32
            })
        })
    }

    #[test]
    fn four_queens_with_every_propagator() {
        let solutions: Vec<_> = Propagator::ALL
            .iter()
            .map(|&propagator| {
                let mut csp = queens(4).unwrap();
                assert_eq!(6, csp.constraints().len());
                assert!(bt_search(&mut csp, propagator, VariableOrder::Mrv));
                csp.solution().unwrap()
            })
            .collect();
        assert!(!attacks(&solutions[0]));
        for solution in &solutions {
            assert_eq!(&vec![2, 4, 1, 3], solution);
        }
    }

    #[test]
    fn no_solution_for_three() {
        for &propagator in &Propagator::ALL {
            let mut csp = queens(3).unwrap();
            assert!(!bt_search(&mut csp, propagator, VariableOrder::First));
            assert!(csp.variables().iter().all(|v| v.is_unpruned() && !v.is_assigned()));
        }
    }

    #[test]
    fn eight_queens() {
        let mut csp = queens(8).unwrap();
        assert!(bt_search(&mut csp, Propagator::gac(), VariableOrder::MrvDegree));
        assert!(!attacks(&csp.solution().unwrap()));
    }
}
