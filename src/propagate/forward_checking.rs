use crate::csp::{ConstraintId, Csp, Pruning, Prunings, Value, VariableId};
use crate::propagate::{DomainWipeout, Propagate, PropagateResult};

/// Prunes the values of the only unassigned variable of a constraint that cannot satisfy the
/// constraint together with the assigned values
///
/// Constraints with no unassigned variables or more than one unassigned variable are skipped.
/// After an assignment, only constraints on the assigned variable are checked. At the root,
/// every constraint is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForwardChecking;

impl Propagate for ForwardChecking {
    fn propagate(&self, csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
        let constraint_ids: Vec<ConstraintId> = match assigned {
            Some(variable) => csp.constraints_with_variable(variable).to_vec(),
            None => csp.constraint_ids().collect(),
        };
        let mut prunings = Vec::new();
        for id in constraint_ids {
            if let Err(DomainWipeout(variable)) = forward_check(csp, id, &mut prunings) {
                debug!(
                    "domain wipeout of {} while forward checking {}",
                    csp.variable(variable).name(),
                    csp.constraint(id).name()
                );
                return PropagateResult::Infeasible(prunings);
            }
        }
        PropagateResult::Consistent(prunings)
    }
}

fn forward_check(
    csp: &mut Csp,
    constraint_id: ConstraintId,
    prunings: &mut Prunings,
) -> Result<(), DomainWipeout> {
    let constraint = csp.constraint(constraint_id);
    let mut free = None;
    let mut values: Vec<Value> = Vec::with_capacity(constraint.arity());
    for (position, &variable) in constraint.scope().iter().enumerate() {
        match csp.variable(variable).assigned_value() {
            Some(value) => values.push(value),
            None => {
                if free.is_some() {
                    return Ok(());
                }
                free = Some((position, variable));
                values.push(Value::default());
            }
        }
    }
    let (position, variable) = match free {
        Some(free) => free,
        None => return Ok(()),
    };
    let to_prune: Vec<Value> = csp
        .variable(variable)
        .cur_domain()
        .filter(|&value| {
            values[position] = value;
            !constraint.check(&values)
        })
        .collect();
    for value in to_prune {
        csp.prune_value(variable, value);
        prunings.push(Pruning::new(variable, value));
    }
    if csp.variable(variable).cur_domain_size() == 0 {
        return Err(DomainWipeout(variable));
    }
    Ok(())
}
