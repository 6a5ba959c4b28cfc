use crate::csp::{ConstraintId, Csp, Pruning, Prunings, Value, VariableId};
use crate::propagate::{DomainWipeout, Propagate, PropagateResult};
use crate::LinkedHashSet;

/// Enforces generalized arc consistency: every value left in a current domain has a support
/// in every constraint on its variable
///
/// Constraints wait in a FIFO queue without duplicates. When a value is pruned from a variable,
/// every constraint on that variable is queued again, since its supports may have relied on that
/// value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeneralizedArcConsistency;

impl Propagate for GeneralizedArcConsistency {
    fn propagate(&self, csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
        let mut queue = LinkedHashSet::default();
        let initial: Vec<ConstraintId> = match assigned {
            Some(variable) => csp.constraints_with_variable(variable).to_vec(),
            None => csp.constraint_ids().collect(),
        };
        for id in initial {
            queue.insert(id);
        }
        let mut prunings = Vec::new();
        match enforce(csp, &mut queue, &mut prunings) {
            Ok(()) => PropagateResult::Consistent(prunings),
            Err(DomainWipeout(variable)) => {
                debug!("domain wipeout of {} during GAC", csp.variable(variable).name());
                PropagateResult::Infeasible(prunings)
            }
        }
    }
}

fn enforce(
    csp: &mut Csp,
    queue: &mut LinkedHashSet<ConstraintId>,
    prunings: &mut Prunings,
) -> Result<(), DomainWipeout> {
    while let Some(constraint_id) = queue.pop_front() {
        let scope = csp.constraint(constraint_id).scope().to_vec();
        for variable in scope {
            let unsupported: Vec<Value> = csp
                .variable(variable)
                .cur_domain()
                .filter(|&value| !csp.has_support(constraint_id, variable, value))
                .collect();
            if unsupported.is_empty() {
                continue;
            }
            for value in unsupported {
                csp.prune_value(variable, value);
                prunings.push(Pruning::new(variable, value));
            }
            if csp.variable(variable).cur_domain_size() == 0 {
                return Err(DomainWipeout(variable));
            }
            for &id in csp.constraints_with_variable(variable) {
                if !queue.contains(&id) {
                    queue.insert(id);
                }
            }
        }
    }
    Ok(())
}
