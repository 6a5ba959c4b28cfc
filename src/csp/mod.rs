//! The constraint model: variables, extensional constraints and the CSP that owns them

pub use self::constraint::Constraint;
pub use self::variable::Variable;

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::error::InvalidModel;

mod constraint;
mod variable;

/// A value in a variable domain
pub type Value = i32;

/// Identifies a variable within a `Csp`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a constraint within a `Csp`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A value removed from the current domain of a variable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pruning {
    pub variable: VariableId,
    pub value: Value,
}

impl Pruning {
    pub fn new(variable: VariableId, value: Value) -> Self {
        Self { variable, value }
    }
}

/// The prunings made by one propagation, in the order they were made
pub type Prunings = Vec<Pruning>;

/// A constraint satisfaction problem
///
/// Owns the variables and constraints and indexes, for every variable, the constraints that
/// mention it. Only the current domains and assignments of variables change during search.
#[derive(Clone, Debug)]
pub struct Csp {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    /// variable index -> constraints with the variable in scope
    incidence: Vec<Vec<ConstraintId>>,
}

impl Csp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            incidence: Vec::new(),
        }
    }

    pub fn with_variables(name: impl Into<String>, variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut csp = Self::new(name);
        for variable in variables {
            csp.add_variable(variable);
        }
        csp
    }

    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(variable);
        self.incidence.push(Vec::new());
        id
    }

    /// Adds a constraint after checking that its scope and tuples fit the variables of this CSP
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, InvalidModel> {
        constraint.validate(&self.name, &self.variables)?;
        let id = ConstraintId(self.constraints.len());
        for variable in constraint.scope() {
            self.incidence[variable.index()].push(id);
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    /// Extends the domain of a variable. Must not be called during a search.
    pub fn add_domain_values(&mut self, variable: VariableId, values: impl IntoIterator<Item = Value>) {
        self.variables[variable.index()].add_domain_values(values);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> {
        (0..self.variables.len()).map(VariableId)
    }

    /// Finds a variable by name
    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.variables.iter().position(|v| v.name() == name).map(VariableId)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.index()]
    }

    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        (0..self.constraints.len()).map(ConstraintId)
    }

    pub fn constraints_with_variable(&self, variable: VariableId) -> &[ConstraintId] {
        &self.incidence[variable.index()]
    }

    pub fn unassigned_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variable_ids().filter(move |&v| !self.variable(v).is_assigned())
    }

    /// Removes `value` from the current domain of `variable`. The value must be in the current
    /// domain.
    pub fn prune_value(&mut self, variable: VariableId, value: Value) {
        trace!("prune {} from {}", value, self.variables[variable.index()].name());
        self.variables[variable.index()].prune(value);
    }

    /// Puts a pruned value back in the current domain of `variable`
    pub fn restore_value(&mut self, variable: VariableId, value: Value) {
        self.variables[variable.index()].restore(value);
    }

    /// Restores the prunings in reverse order
    pub fn restore_prunings(&mut self, prunings: &[Pruning]) {
        for pruning in prunings.iter().rev() {
            self.restore_value(pruning.variable, pruning.value);
        }
    }

    /// Makes the current domain of `variable` equal its original domain
    pub fn restore_current_domain(&mut self, variable: VariableId) {
        self.variables[variable.index()].restore_all();
    }

    /// Unassigns every variable and restores every current domain
    pub fn restore_all_variable_domains(&mut self) {
        for variable in &mut self.variables {
            if variable.is_assigned() {
                variable.unassign();
            }
            variable.restore_all();
        }
    }

    pub fn assign(&mut self, variable: VariableId, value: Value) {
        self.variables[variable.index()].assign(value);
    }

    pub fn unassign(&mut self, variable: VariableId) {
        self.variables[variable.index()].unassign();
    }

    /// See [`Constraint::has_support`]
    pub fn has_support(&self, constraint: ConstraintId, variable: VariableId, value: Value) -> bool {
        self.constraint(constraint)
            .has_support(&self.variables, variable, value)
    }

    /// Returns true if every variable is assigned and every constraint is satisfied
    pub fn is_satisfied(&self) -> bool {
        self.constraints.iter().all(|c| {
            c.assigned_values(&self.variables)
                .map_or(false, |values| c.check(&values))
        }) && self.variables.iter().all(Variable::is_assigned)
    }

    /// The assigned value of every variable, in variable order, if all are assigned
    pub fn solution(&self) -> Option<Vec<Value>> {
        self.variables.iter().map(Variable::assigned_value).collect()
    }
}

impl Display for Csp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSP {}:", self.name)?;
        for variable in &self.variables {
            writeln!(f, "  {}", variable)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::csp::{Constraint, Csp, Pruning, Variable, VariableId};
    use crate::error::InvalidModel;

    fn two_variables() -> (Csp, VariableId, VariableId) {
        let mut csp = Csp::new("test");
        let a = csp.add_variable(Variable::new("a", 1..=3));
        let b = csp.add_variable(Variable::new("b", 1..=3));
        (csp, a, b)
    }

    #[test]
    fn incidence_index() {
        let (mut csp, a, b) = two_variables();
        let mut ab = Constraint::new("ab", vec![a, b]);
        ab.add_satisfying_tuples(vec![[1, 2]]).unwrap();
        let mut unary = Constraint::new("b", vec![b]);
        unary.add_satisfying_tuples(vec![[2]]).unwrap();
        let ab = csp.add_constraint(ab).unwrap();
        let unary = csp.add_constraint(unary).unwrap();
        assert_eq!(&[ab], csp.constraints_with_variable(a));
        assert_eq!(&[ab, unary], csp.constraints_with_variable(b));
        assert_eq!(Some(b), csp.variable_id("b"));
    }

    #[test]
    fn unknown_variable() {
        let (mut csp, a, _) = two_variables();
        let constraint = Constraint::new("c", vec![a, VariableId::new(7)]);
        assert_eq!(
            Err(InvalidModel::UnknownVariable {
                constraint: "c".into(),
                csp: "test".into()
            }),
            csp.add_constraint(constraint)
        );
    }

    #[test]
    fn duplicate_scope_variable() {
        let (mut csp, a, _) = two_variables();
        let constraint = Constraint::new("c", vec![a, a]);
        assert_eq!(
            Err(InvalidModel::DuplicateScopeVariable {
                constraint: "c".into(),
                variable: "a".into()
            }),
            csp.add_constraint(constraint)
        );
    }

    #[test]
    fn empty_scope() {
        let (mut csp, _, _) = two_variables();
        let constraint = Constraint::new("c", Vec::<VariableId>::new());
        assert!(matches!(
            csp.add_constraint(constraint),
            Err(InvalidModel::EmptyScope { .. })
        ));
    }

    #[test]
    fn restore_prunings() {
        let (mut csp, a, b) = two_variables();
        csp.prune_value(a, 1);
        csp.prune_value(b, 3);
        csp.prune_value(a, 2);
        csp.restore_prunings(&[Pruning::new(a, 1), Pruning::new(a, 2)]);
        assert!(csp.variable(a).is_unpruned());
        assert_eq!(vec![1, 2], csp.variable(b).cur_domain().collect::<Vec<_>>());
        csp.restore_current_domain(b);
        assert!(csp.variable(b).is_unpruned());
    }

    #[test]
    fn restore_all_variable_domains() {
        let (mut csp, a, b) = two_variables();
        csp.prune_value(a, 1);
        csp.assign(b, 2);
        csp.restore_all_variable_domains();
        assert!(csp.variables().iter().all(|v| v.is_unpruned() && !v.is_assigned()));
        assert_eq!(2, csp.unassigned_variables().count());
    }

    #[test]
    fn solution() {
        let (mut csp, a, b) = two_variables();
        let mut lt = Constraint::new("lt", vec![a, b]);
        lt.add_satisfying_tuples(vec![[1, 2], [1, 3], [2, 3]]).unwrap();
        csp.add_constraint(lt).unwrap();
        csp.assign(a, 2);
        assert_eq!(None, csp.solution());
        assert!(!csp.is_satisfied());
        csp.assign(b, 3);
        assert_eq!(Some(vec![2, 3]), csp.solution());
        assert!(csp.is_satisfied());
        csp.unassign(b);
        csp.assign(b, 1);
        assert!(!csp.is_satisfied());
    }
}
