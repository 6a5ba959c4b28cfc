//! Constraint propagators
//!
//! A propagator narrows current domains after an assignment (or at the root, before any
//! assignment) without removing values that belong to a solution. It reports every value it
//! pruned so that the search can restore exactly those values when it backtracks.

pub use self::forward_checking::ForwardChecking;
pub use self::gac::GeneralizedArcConsistency;
pub use self::plain::PlainBacktracking;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use thiserror::Error;

use crate::csp::{Csp, Pruning, Prunings, VariableId};

mod forward_checking;
mod gac;
mod plain;

/// The outcome of one propagator run
#[derive(Debug, PartialEq)]
pub enum PropagateResult {
    /// No variable lost its whole current domain
    Consistent(Prunings),
    /// A constraint cannot be satisfied anymore, such as after a domain wipeout.
    /// The prunings made before the failure was found still need to be restored.
    Infeasible(Prunings),
}

impl PropagateResult {
    pub fn is_consistent(&self) -> bool {
        matches!(self, PropagateResult::Consistent(_))
    }

    pub fn prunings(&self) -> &[Pruning] {
        match self {
            PropagateResult::Consistent(prunings) | PropagateResult::Infeasible(prunings) => prunings,
        }
    }

    pub fn into_prunings(self) -> Prunings {
        match self {
            PropagateResult::Consistent(prunings) | PropagateResult::Infeasible(prunings) => prunings,
        }
    }
}

/// A variable whose current domain became empty
#[derive(Debug)]
struct DomainWipeout(VariableId);

#[enum_dispatch]
pub trait Propagate {
    /// Propagates constraints after `assigned` was assigned, or over every constraint when
    /// `assigned` is `None`
    fn propagate(&self, csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult;
}

/// The available propagation strategies
#[enum_dispatch(Propagate)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Propagator {
    PlainBacktracking,
    ForwardChecking,
    GeneralizedArcConsistency,
}

impl Propagator {
    pub const ALL: [Propagator; 3] = [
        Propagator::PlainBacktracking(PlainBacktracking),
        Propagator::ForwardChecking(ForwardChecking),
        Propagator::GeneralizedArcConsistency(GeneralizedArcConsistency),
    ];

    pub fn plain() -> Self {
        PlainBacktracking.into()
    }

    pub fn forward_checking() -> Self {
        ForwardChecking.into()
    }

    pub fn gac() -> Self {
        GeneralizedArcConsistency.into()
    }

    /// The short name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Propagator::PlainBacktracking(_) => "bt",
            Propagator::ForwardChecking(_) => "fc",
            Propagator::GeneralizedArcConsistency(_) => "gac",
        }
    }
}

impl Default for Propagator {
    fn default() -> Self {
        Self::gac()
    }
}

impl Display for Propagator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown propagator \"{0}\", expected one of bt, fc, gac")]
pub struct UnknownPropagator(String);

impl FromStr for Propagator {
    type Err = UnknownPropagator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bt" | "plain" => Ok(Self::plain()),
            "fc" => Ok(Self::forward_checking()),
            "gac" => Ok(Self::gac()),
            _ => Err(UnknownPropagator(s.to_owned())),
        }
    }
}

/// Runs plain backtracking propagation. See [`PlainBacktracking`].
pub fn propagate_plain(csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
    PlainBacktracking.propagate(csp, assigned)
}

/// Runs forward checking. See [`ForwardChecking`].
pub fn propagate_forward_checking(csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
    ForwardChecking.propagate(csp, assigned)
}

/// Runs generalized arc consistency. See [`GeneralizedArcConsistency`].
pub fn propagate_gac(csp: &mut Csp, assigned: Option<VariableId>) -> PropagateResult {
    GeneralizedArcConsistency.propagate(csp, assigned)
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::csp::{Constraint, Csp, Variable, VariableId};
    use crate::propagate::{Propagate, PropagateResult, Propagator};

    /// x < y < z over {1, 2, 3}
    pub(crate) fn chain() -> (Csp, [VariableId; 3]) {
        let mut csp = Csp::new("chain");
        let x = csp.add_variable(Variable::new("x", 1..=3));
        let y = csp.add_variable(Variable::new("y", 1..=3));
        let z = csp.add_variable(Variable::new("z", 1..=3));
        for (name, a, b) in vec![("x<y", x, y), ("y<z", y, z)] {
            let mut constraint = Constraint::new(name, vec![a, b]);
            constraint
                .add_satisfying_tuples(vec![[1, 2], [1, 3], [2, 3]])
                .unwrap();
            csp.add_constraint(constraint).unwrap();
        }
        (csp, [x, y, z])
    }

    #[test]
    fn parse_names() {
        for &propagator in &Propagator::ALL {
            assert_eq!(propagator, propagator.name().parse().unwrap());
        }
        assert_eq!(Propagator::plain(), "plain".parse().unwrap());
        assert!("ac3".parse::<Propagator>().is_err());
    }

    #[test]
    fn dispatch() {
        let (mut csp, _) = chain();
        let result = Propagator::gac().propagate(&mut csp, None);
        assert!(result.is_consistent());
        assert_eq!(6, result.prunings().len());
        csp.restore_prunings(result.prunings());
        assert!(csp.variables().iter().all(Variable::is_unpruned));
        assert_eq!(
            PropagateResult::Consistent(vec![]),
            Propagator::plain().propagate(&mut csp, None)
        );
    }
}
