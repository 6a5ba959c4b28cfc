use std::fmt;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::collections::range_set::RangeSet;
use crate::csp::Value;
use crate::HashMap;

/// A CSP variable
///
/// The original domain is kept in insertion order and never shrinks. The current domain is the
/// subset of the original domain that has not been pruned. While a value is assigned, the
/// variable behaves as if its current domain were only the assigned value (or nothing, if that
/// value has been pruned).
#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    domain: Vec<Value>,
    /// value -> position in `domain`
    positions: HashMap<Value, usize>,
    /// positions in `domain` that are not pruned
    current: RangeSet,
    assigned: Option<Value>,
}

impl Variable {
    /// Creates a variable with an initial domain. Duplicate values are ignored.
    pub fn new(name: impl Into<String>, domain: impl IntoIterator<Item = Value>) -> Self {
        let mut variable = Self {
            name: name.into(),
            domain: Vec::new(),
            positions: HashMap::default(),
            current: RangeSet::new(0),
            assigned: None,
        };
        variable.add_domain_values(domain);
        variable
    }

    /// Extends both the original and the current domain.
    ///
    /// Must not be called while the variable takes part in a search.
    pub fn add_domain_values(&mut self, values: impl IntoIterator<Item = Value>) {
        for value in values {
            if self.positions.contains_key(&value) {
                continue;
            }
            self.positions.insert(value, self.domain.len());
            self.domain.push(value);
            self.current.grow(true);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original domain
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }

    pub fn in_domain(&self, value: Value) -> bool {
        self.positions.contains_key(&value)
    }

    /// The values of the current domain, in original domain order
    pub fn cur_domain(&self) -> impl Iterator<Item = Value> + '_ {
        let (assigned, unassigned) = match self.assigned {
            Some(value) => (Some(value).filter(|&v| self.is_available(v)), None),
            None => (None, Some(self.current.iter().map(move |i| self.domain[i]))),
        };
        assigned.into_iter().chain(unassigned.into_iter().flatten())
    }

    pub fn cur_domain_size(&self) -> usize {
        match self.assigned {
            Some(value) => self.is_available(value) as usize,
            None => self.current.len(),
        }
    }

    pub fn in_cur_domain(&self, value: Value) -> bool {
        match self.assigned {
            Some(assigned) => assigned == value && self.is_available(value),
            None => self.is_available(value),
        }
    }

    /// Returns true if no value of the original domain is pruned
    pub fn is_unpruned(&self) -> bool {
        self.current.is_full()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn assigned_value(&self) -> Option<Value> {
        self.assigned
    }

    /// `value` is in the domain and has not been pruned, regardless of assignment
    fn is_available(&self, value: Value) -> bool {
        self.positions
            .get(&value)
            .map_or(false, |&i| self.current.contains(i))
    }

    /// The caller must only prune values that are currently available
    pub(crate) fn prune(&mut self, value: Value) {
        let removed = match self.positions.get(&value) {
            Some(&i) => self.current.remove(i),
            None => false,
        };
        debug_assert!(removed, "pruned {} from {} but it was not available", value, self.name);
    }

    pub(crate) fn restore(&mut self, value: Value) {
        let restored = match self.positions.get(&value) {
            Some(&i) => self.current.insert(i),
            None => false,
        };
        debug_assert!(restored, "restored {} to {} but it was not pruned", value, self.name);
    }

    pub(crate) fn restore_all(&mut self) {
        self.current.fill();
    }

    pub(crate) fn assign(&mut self, value: Value) {
        debug_assert!(self.assigned.is_none(), "{} is already assigned", self.name);
        debug_assert!(self.in_domain(value));
        self.assigned = Some(value);
    }

    pub(crate) fn unassign(&mut self) {
        debug_assert!(self.assigned.is_some(), "{} is not assigned", self.name);
        self.assigned = None;
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.assigned {
            Some(value) => write!(f, "{} = {}", self.name, value),
            None => write!(f, "{} in {{{}}}", self.name, self.cur_domain().join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;

    #[test]
    fn duplicate_values_ignored() {
        let mut variable = Variable::new("x", vec![3, 1, 3]);
        variable.add_domain_values(vec![1, 2]);
        assert_eq!(&[3, 1, 2], variable.domain());
        assert_eq!(vec![3, 1, 2], variable.cur_domain().collect::<Vec<_>>());
    }

    #[test]
    fn prune_restore() {
        let mut variable = Variable::new("x", 1..=4);
        variable.prune(2);
        variable.prune(4);
        assert_eq!(vec![1, 3], variable.cur_domain().collect::<Vec<_>>());
        assert_eq!(2, variable.cur_domain_size());
        assert!(!variable.in_cur_domain(2));
        assert!(variable.in_domain(2));
        variable.restore(4);
        assert_eq!(vec![1, 3, 4], variable.cur_domain().collect::<Vec<_>>());
        variable.restore_all();
        assert!(variable.is_unpruned());
    }

    #[test]
    fn assigned_domain_is_the_assigned_value() {
        let mut variable = Variable::new("x", 1..=4);
        variable.prune(1);
        variable.assign(3);
        assert_eq!(vec![3], variable.cur_domain().collect::<Vec<_>>());
        assert_eq!(1, variable.cur_domain_size());
        assert!(variable.in_cur_domain(3));
        assert!(!variable.in_cur_domain(2));
        variable.prune(3);
        assert_eq!(0, variable.cur_domain_size());
        assert_eq!(None, variable.cur_domain().next());
        variable.restore(3);
        variable.unassign();
        assert_eq!(vec![2, 3, 4], variable.cur_domain().collect::<Vec<_>>());
    }

    #[test]
    fn display() {
        let mut variable = Variable::new("x", 1..=3);
        variable.prune(2);
        assert_eq!("x in {1, 3}", variable.to_string());
        variable.assign(3);
        assert_eq!("x = 3", variable.to_string());
    }
}
