use std::fmt;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::csp::{Value, Variable, VariableId};
use crate::error::InvalidModel;
use crate::{HashMap, HashSet};

/// A constraint given extensionally, by the list of value tuples that satisfy it
///
/// Tuples are positional: `tuple[i]` is a value for `scope[i]`.
#[derive(Clone, Debug)]
pub struct Constraint {
    name: String,
    scope: Vec<VariableId>,
    tuples: Vec<Box<[Value]>>,
    satisfying: HashSet<Box<[Value]>>,
    /// for every scope position, value -> indices into `tuples` with that value at the position
    supports: Vec<HashMap<Value, Vec<usize>>>,
}

impl Constraint {
    pub fn new(name: impl Into<String>, scope: impl Into<Vec<VariableId>>) -> Self {
        let scope = scope.into();
        Self {
            name: name.into(),
            supports: vec![HashMap::default(); scope.len()],
            scope,
            tuples: Vec::new(),
            satisfying: HashSet::default(),
        }
    }

    /// Adds tuples to the relation. Fails if a tuple does not have one value per scope variable.
    pub fn add_satisfying_tuples<I>(&mut self, tuples: I) -> Result<(), InvalidModel>
    where
        I: IntoIterator,
        I::Item: AsRef<[Value]>,
    {
        for tuple in tuples {
            self.add_satisfying_tuple(tuple.as_ref())?;
        }
        Ok(())
    }

    pub fn add_satisfying_tuple(&mut self, tuple: &[Value]) -> Result<(), InvalidModel> {
        if tuple.len() != self.scope.len() {
            return Err(InvalidModel::TupleArity {
                constraint: self.name.clone(),
                tuple: tuple.to_vec(),
                expected: self.scope.len(),
                actual: tuple.len(),
            });
        }
        if self.satisfying.contains(tuple) {
            return Ok(());
        }
        let index = self.tuples.len();
        for (position, &value) in tuple.iter().enumerate() {
            self.supports[position].entry(value).or_default().push(index);
        }
        self.tuples.push(tuple.into());
        self.satisfying.insert(tuple.into());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    pub fn tuples(&self) -> impl Iterator<Item = &[Value]> {
        self.tuples.iter().map(|t| &**t)
    }

    pub fn tuple_count(&self) -> usize {
        self.tuples.len()
    }

    pub fn position(&self, variable: VariableId) -> Option<usize> {
        self.scope.iter().position(|&v| v == variable)
    }

    /// Returns true if `values`, aligned with the scope, satisfy the constraint
    pub fn check(&self, values: &[Value]) -> bool {
        self.satisfying.contains(values)
    }

    /// Returns true if some satisfying tuple has `value` for `variable` and, for every other
    /// scope variable, a value in that variable's current domain.
    pub fn has_support(&self, variables: &[Variable], variable: VariableId, value: Value) -> bool {
        let position = match self.position(variable) {
            Some(position) => position,
            None => return false,
        };
        let candidates = match self.supports[position].get(&value) {
            Some(candidates) => candidates,
            None => return false,
        };
        candidates.iter().any(|&t| {
            let tuple = &self.tuples[t];
            self.scope
                .iter()
                .enumerate()
                .all(|(j, v)| j == position || variables[v.index()].in_cur_domain(tuple[j]))
        })
    }

    pub fn unassigned_count(&self, variables: &[Variable]) -> usize {
        self.unassigned_variables(variables).count()
    }

    pub fn unassigned_variables<'a>(
        &'a self,
        variables: &'a [Variable],
    ) -> impl Iterator<Item = VariableId> + 'a {
        self.scope
            .iter()
            .copied()
            .filter(move |v| !variables[v.index()].is_assigned())
    }

    /// The assigned values of the scope, if every scope variable is assigned
    pub fn assigned_values(&self, variables: &[Variable]) -> Option<Vec<Value>> {
        self.scope
            .iter()
            .map(|v| variables[v.index()].assigned_value())
            .collect()
    }

    pub(crate) fn validate(&self, csp_name: &str, variables: &[Variable]) -> Result<(), InvalidModel> {
        if self.scope.is_empty() {
            return Err(InvalidModel::EmptyScope {
                constraint: self.name.clone(),
            });
        }
        if self.scope.iter().any(|v| v.index() >= variables.len()) {
            return Err(InvalidModel::UnknownVariable {
                constraint: self.name.clone(),
                csp: csp_name.to_owned(),
            });
        }
        let duplicate = self
            .scope
            .iter()
            .enumerate()
            .find(|&(i, v)| self.scope[..i].contains(v));
        if let Some((_, v)) = duplicate {
            return Err(InvalidModel::DuplicateScopeVariable {
                constraint: self.name.clone(),
                variable: variables[v.index()].name().to_owned(),
            });
        }
        for (position, supports) in self.supports.iter().enumerate() {
            let variable = &variables[self.scope[position].index()];
            if let Some(&value) = supports.keys().find(|&&value| !variable.in_domain(value)) {
                return Err(InvalidModel::ValueOutsideDomain {
                    constraint: self.name.clone(),
                    variable: variable.name().to_owned(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) with {} tuples",
            self.name,
            self.scope.iter().join(", "),
            self.tuples.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::csp::{Constraint, Variable, VariableId};
    use crate::error::InvalidModel;

    fn sum_to_six() -> (Vec<Variable>, Constraint) {
        let variables = vec![Variable::new("v1", 1..=4), Variable::new("v2", 1..=4)];
        let mut constraint = Constraint::new("sum", vec![VariableId::new(0), VariableId::new(1)]);
        constraint
            .add_satisfying_tuples(vec![[2, 4], [4, 2], [3, 3], [2, 4]])
            .unwrap();
        (variables, constraint)
    }

    #[test]
    fn duplicate_tuples_are_merged() {
        let (_, constraint) = sum_to_six();
        assert_eq!(3, constraint.tuple_count());
    }

    #[test]
    fn check() {
        let (_, constraint) = sum_to_six();
        assert!(constraint.check(&[3, 3]));
        assert!(constraint.check(&[4, 2]));
        assert!(!constraint.check(&[1, 4]));
        assert!(!constraint.check(&[3]));
    }

    #[test]
    fn has_support_uses_current_domains() {
        let (mut variables, constraint) = sum_to_six();
        let (v1, v2) = (VariableId::new(0), VariableId::new(1));
        assert!(!constraint.has_support(&variables, v1, 1));
        assert!(constraint.has_support(&variables, v1, 2));
        variables[1].prune(4);
        assert!(!constraint.has_support(&variables, v1, 2));
        assert!(constraint.has_support(&variables, v1, 4));
        variables[0].assign(3);
        assert!(constraint.has_support(&variables, v2, 3));
        assert!(!constraint.has_support(&variables, v2, 2));
    }

    #[test]
    fn wrong_arity() {
        let mut constraint = Constraint::new("c", vec![VariableId::new(0), VariableId::new(1)]);
        let result = constraint.add_satisfying_tuples(vec![vec![1, 2], vec![1, 2, 3]]);
        assert_eq!(
            Err(InvalidModel::TupleArity {
                constraint: "c".into(),
                tuple: vec![1, 2, 3],
                expected: 2,
                actual: 3,
            }),
            result
        );
    }

    #[test]
    fn value_outside_domain() {
        let (variables, mut constraint) = sum_to_six();
        constraint.add_satisfying_tuple(&[1, 5]).unwrap();
        assert_eq!(
            Err(InvalidModel::ValueOutsideDomain {
                constraint: "sum".into(),
                variable: "v2".into(),
                value: 5,
            }),
            constraint.validate("test", &variables)
        );
    }

    #[test]
    fn assigned_values() {
        let (mut variables, constraint) = sum_to_six();
        variables[0].assign(2);
        assert_eq!(None, constraint.assigned_values(&variables));
        assert_eq!(1, constraint.unassigned_count(&variables));
        variables[1].assign(4);
        assert_eq!(Some(vec![2, 4]), constraint.assigned_values(&variables));
    }
}
