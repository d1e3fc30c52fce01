//! The mutable solver state: the clause store, its residual/unit-queue
//! tracker, the current (partial) assignment, and running statistics.

use crate::cnf::{Clause, ClauseId, VarId};
use crate::solver::clause_store::ClauseStore;
use crate::solver::residual::{Propagator, Residual};
use crate::solver::statistics::StateStatistics;

#[derive(Debug, Clone)]
pub struct State {
    pub vars: Vec<Option<bool>>,
    pub store: ClauseStore,
    pub propagator: Propagator,
    pub num_vars: usize,
    pub stats: StateStatistics,
}

impl State {
    pub fn new(clauses: Vec<Clause>, num_vars: usize) -> Self {
        let store = ClauseStore::new(clauses, num_vars);
        let vars = vec![None; num_vars + 1];
        let propagator = Propagator::new(&store, &vars);
        State {
            stats: StateStatistics::new(store.len(), num_vars),
            store,
            propagator,
            vars,
            num_vars,
        }
    }

    pub fn assign(&mut self, var: VarId, value: bool) {
        debug_assert!(self.vars[var].is_none(), "variable {var} already assigned");
        self.vars[var] = Some(value);
        self.propagator.on_assign(&self.store, var, value);
        self.stats.num_assignments += 1;
    }

    pub fn unassign(&mut self, var: VarId, old_value: bool) {
        self.vars[var] = None;
        self.propagator.on_unassign(&self.store, var, old_value, &self.vars);
    }

    /// Adds a learned clause to the store and, if it is genuinely new
    /// (content-duplicates collapse onto an existing id), registers its
    /// residual against the current assignment.
    pub fn learn_clause(&mut self, clause: Clause) -> ClauseId {
        let next_id = self.propagator.residual_len();
        let id = self.store.add_clause(clause);
        if id == next_id {
            self.propagator.register_clause(&self.store, id, &self.vars);
        }
        id
    }

    pub fn is_satisfied(&self) -> bool {
        self.propagator.is_all_satisfied()
    }

    pub fn residual(&self, id: ClauseId) -> &Residual {
        self.propagator.residual(id)
    }
}
