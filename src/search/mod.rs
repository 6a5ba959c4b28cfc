//! Backtracking search over a [`Csp`]

pub use self::ordering::{
    select_variable_degree, select_variable_first, select_variable_mrv, select_variable_mrv_degree,
    UnknownValueOrder, UnknownVariableOrder, ValueOrder, VariableOrder,
};

use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use crate::csp::{Csp, VariableId};
use crate::propagate::{Propagate, PropagateResult, Propagator};

mod ordering;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchResult {
    /// Every combination of values was ruled out
    Unsolvable,
    /// Every variable is assigned and every constraint is satisfied
    Solved,
}

impl SearchResult {
    pub fn is_solved(self) -> bool {
        matches!(self, SearchResult::Solved)
    }
}

/// Counters collected during one search
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    /// Variables branched on
    pub decisions: u64,
    /// Propagator runs, the root run included
    pub propagations: u64,
    /// Values pruned by propagation, including the ones restored later
    pub prunings: u64,
    /// Values that were tried and undone
    pub backtracks: u64,
    pub elapsed: Duration,
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} decisions, {} propagations, {} prunings, {} backtracks in {:?}",
            self.decisions, self.propagations, self.prunings, self.backtracks, self.elapsed
        )
    }
}

/// Finds one solution of a [`Csp`] by depth-first search with propagation after every
/// assignment
///
/// Solving starts by unassigning every variable and restoring every current domain. When a
/// solution is found, the CSP is left holding it: every variable is assigned, [`Csp::solution`]
/// returns the values and every pruning made on the way to the solution, root prunings included,
/// stays in effect. After a failed search every current domain equals its original domain.
pub struct BacktrackSearch<'a> {
    csp: &'a mut Csp,
    propagator: Propagator,
    variable_order: VariableOrder,
    value_order: ValueOrder,
    stats: SearchStats,
}

impl<'a> BacktrackSearch<'a> {
    pub fn new(csp: &'a mut Csp, propagator: Propagator) -> Self {
        Self {
            csp,
            propagator,
            variable_order: VariableOrder::default(),
            value_order: ValueOrder::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn variable_order(&mut self, variable_order: VariableOrder) -> &mut Self {
        self.variable_order = variable_order;
        self
    }

    pub fn value_order(&mut self, value_order: ValueOrder) -> &mut Self {
        self.value_order = value_order;
        self
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn solve(&mut self) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        self.csp.restore_all_variable_domains();
        info!(
            "Solving {} with {} propagation, {} variable order and {} value order",
            self.csp.name(),
            self.propagator,
            self.variable_order,
            self.value_order
        );
        let root = self.propagate(None);
        let solved = if root.is_consistent() {
            self.search(1)
        } else {
            debug!("Contradiction found before the first assignment");
            false
        };
        if !solved {
            self.csp.restore_prunings(root.prunings());
        }
        self.stats.elapsed = start.elapsed();
        let result = if solved {
            debug_assert!(self.csp.is_satisfied());
            info!("Solved {}", self.csp.name());
            SearchResult::Solved
        } else {
            info!("{} has no solution", self.csp.name());
            SearchResult::Unsolvable
        };
        info!("Search stats: {}", self.stats);
        result
    }

    fn search(&mut self, depth: u32) -> bool {
        let variable = match self.variable_order.select(self.csp) {
            Some(variable) => variable,
            None => return self.csp.is_satisfied(),
        };
        self.stats.decisions += 1;
        // the current domain changes while values are tried
        let values = self.value_order.order(self.csp, variable);
        debug!(
            "Branching on {} with {} values (depth={})",
            self.csp.variable(variable).name(),
            values.len(),
            depth
        );
        for value in values {
            trace!("Trying {} = {}", self.csp.variable(variable).name(), value);
            self.csp.assign(variable, value);
            let result = self.propagate(Some(variable));
            if result.is_consistent() && self.search(depth + 1) {
                return true;
            }
            self.stats.backtracks += 1;
            self.csp.restore_prunings(result.prunings());
            self.csp.unassign(variable);
        }
        false
    }

    fn propagate(&mut self, assigned: Option<VariableId>) -> PropagateResult {
        let result = self.propagator.propagate(self.csp, assigned);
        self.stats.propagations += 1;
        self.stats.prunings += result.prunings().len() as u64;
        result
    }
}

/// Searches for one solution with the given propagator and variable ordering, trying values in
/// domain order. Returns true if a solution was found, in which case the CSP holds it.
pub fn bt_search(csp: &mut Csp, propagator: Propagator, variable_order: VariableOrder) -> bool {
    BacktrackSearch::new(csp, propagator)
        .variable_order(variable_order)
        .solve()
        .is_solved()
}
