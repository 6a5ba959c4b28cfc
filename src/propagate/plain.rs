use crate::csp::{Csp, VariableId};
use crate::propagate::{Propagate, PropagateResult};

/// Checks constraints only once all of their variables are assigned. Never prunes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlainBacktracking;

impl Propagate for PlainBacktracking {
    fn propagate(&self, csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
        let variable = match assigned {
            Some(variable) => variable,
            None => return PropagateResult::Consistent(Vec::new()),
        };
        for &id in csp.constraints_with_variable(variable) {
            let constraint = csp.constraint(id);
            let values = match constraint.assigned_values(csp.variables()) {
                Some(values) => values,
                None => continue,
            };
            if !constraint.check(&values) {
                debug!("constraint {} violated by {:?}", constraint.name(), values);
                return PropagateResult::Infeasible(Vec::new());
            }
        }
        PropagateResult::Consistent(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::propagate::tests::chain;
    use crate::propagate::{propagate_plain, PropagateResult};

    #[test]
    fn root_is_trivial() {
        let (mut csp, _) = chain();
        assert_eq!(PropagateResult::Consistent(vec![]), propagate_plain(&mut csp, None));
    }

    #[test]
    fn checks_fully_assigned_constraints() {
        let (mut csp, [x, y, z]) = chain();
        csp.assign(y, 1);
        // x is unassigned so x<y is not checked yet
        assert_eq!(PropagateResult::Consistent(vec![]), propagate_plain(&mut csp, Some(y)));
        csp.assign(z, 2);
        assert_eq!(PropagateResult::Consistent(vec![]), propagate_plain(&mut csp, Some(z)));
        csp.assign(x, 1);
        assert_eq!(PropagateResult::Infeasible(vec![]), propagate_plain(&mut csp, Some(x)));
        assert!(csp.variables().iter().all(|v| v.is_unpruned()));
    }
}
