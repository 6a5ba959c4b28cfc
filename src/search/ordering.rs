//! Variable and value ordering heuristics

use std::cmp::Reverse;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::csp::{Csp, Value, VariableId};

/// Chooses the next variable to branch on
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariableOrder {
    /// The first unassigned variable
    First,
    /// Minimum remaining values, ties broken by variable order
    Mrv,
    /// Most constraints with other unassigned variables, ties broken by variable order
    Degree,
    /// Minimum remaining values, ties broken by degree and then by variable order
    MrvDegree,
}

impl VariableOrder {
    pub const ALL: [VariableOrder; 4] = [
        VariableOrder::First,
        VariableOrder::Mrv,
        VariableOrder::Degree,
        VariableOrder::MrvDegree,
    ];

    /// Returns `None` if every variable is assigned
    pub fn select(self, csp: &Csp) -> Option<VariableId> {
        match self {
            VariableOrder::First => select_variable_first(csp),
            VariableOrder::Mrv => select_variable_mrv(csp),
            VariableOrder::Degree => select_variable_degree(csp),
            VariableOrder::MrvDegree => select_variable_mrv_degree(csp),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VariableOrder::First => "first",
            VariableOrder::Mrv => "mrv",
            VariableOrder::Degree => "degree",
            VariableOrder::MrvDegree => "mrv-degree",
        }
    }
}

impl Default for VariableOrder {
    fn default() -> Self {
        VariableOrder::Mrv
    }
}

impl Display for VariableOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown variable ordering \"{0}\", expected one of first, mrv, degree, mrv-degree")]
pub struct UnknownVariableOrder(String);

impl FromStr for VariableOrder {
    type Err = UnknownVariableOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.name() == s)
            .ok_or_else(|| UnknownVariableOrder(s.to_owned()))
    }
}

pub fn select_variable_first(csp: &Csp) -> Option<VariableId> {
    csp.unassigned_variables().next()
}

/// The unassigned variable with the smallest current domain. The first such variable wins ties.
pub fn select_variable_mrv(csp: &Csp) -> Option<VariableId> {
    csp.unassigned_variables()
        .min_by_key(|&v| csp.variable(v).cur_domain_size())
}

pub fn select_variable_degree(csp: &Csp) -> Option<VariableId> {
    csp.unassigned_variables()
        .min_by_key(|&v| Reverse(degree(csp, v)))
}

pub fn select_variable_mrv_degree(csp: &Csp) -> Option<VariableId> {
    csp.unassigned_variables()
        .min_by_key(|&v| (csp.variable(v).cur_domain_size(), Reverse(degree(csp, v))))
}

/// The number of constraints on `variable` that also have another unassigned variable
fn degree(csp: &Csp, variable: VariableId) -> usize {
    csp.constraints_with_variable(variable)
        .iter()
        .filter(|&&c| {
            csp.constraint(c)
                .unassigned_variables(csp.variables())
                .any(|v| v != variable)
        })
        .count()
}

/// Orders the values tried for a variable
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueOrder {
    /// Current domain in original domain order
    Domain,
    /// Values that leave the most support to neighbouring variables first
    LeastConstraining,
}

impl ValueOrder {
    pub const ALL: [ValueOrder; 2] = [ValueOrder::Domain, ValueOrder::LeastConstraining];

    /// A snapshot of the current domain of an unassigned variable, in the order to try it
    pub fn order(self, csp: &mut Csp, variable: VariableId) -> Vec<Value> {
        let values: Vec<Value> = csp.variable(variable).cur_domain().collect();
        match self {
            ValueOrder::Domain => values,
            ValueOrder::LeastConstraining => least_constraining(csp, variable, values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueOrder::Domain => "domain",
            ValueOrder::LeastConstraining => "lcv",
        }
    }
}

impl Default for ValueOrder {
    fn default() -> Self {
        ValueOrder::Domain
    }
}

impl Display for ValueOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown value ordering \"{0}\", expected one of domain, lcv")]
pub struct UnknownValueOrder(String);

impl FromStr for ValueOrder {
    type Err = UnknownValueOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.name() == s)
            .ok_or_else(|| UnknownValueOrder(s.to_owned()))
    }
}

/// Sorts values by how many values of neighbouring unassigned variables would lose their
/// support. Equal counts keep domain order.
fn least_constraining(csp: &mut Csp, variable: VariableId, mut values: Vec<Value>) -> Vec<Value> {
    let mut ruled_out = Vec::with_capacity(values.len());
    for &value in &values {
        csp.assign(variable, value);
        ruled_out.push(unsupported_neighbour_values(csp, variable));
        csp.unassign(variable);
    }
    let mut keyed: Vec<(usize, Value)> = ruled_out.into_iter().zip(values.drain(..)).collect();
    keyed.sort_by_key(|&(count, _)| count);
    keyed.into_iter().map(|(_, value)| value).collect()
}

fn unsupported_neighbour_values(csp: &Csp, variable: VariableId) -> usize {
    let mut count = 0;
    for &c in csp.constraints_with_variable(variable) {
        for neighbour in csp.constraint(c).unassigned_variables(csp.variables()) {
            count += csp
                .variable(neighbour)
                .cur_domain()
                .filter(|&value| !csp.has_support(c, neighbour, value))
                .count();
        }
    }
    count
}
